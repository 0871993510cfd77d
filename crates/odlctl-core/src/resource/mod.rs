//! Generic list/get/create over parent-scoped RESTCONF paths.
//!
//! A [`ResourceFamily`] supplies a [`PathTemplate`] and the decoders for
//! its response documents; [`ResourceManager`] owns the algorithm:
//!
//! ```text
//! list_all(scope)     GET operational/<resource_type(scope)>
//! get(id, scope)      GET operational/<resource_type(scope)>/<resource>/<id>
//! create(id, body, …) PUT config/<resource_type(scope)>/<resource>/<id>
//! ```

pub mod flow;
pub mod node;

use std::marker::PhantomData;

use serde_json::Value;
use strum::Display;
use tracing::{debug, info, warn};

use odlctl_api::{RequestBody, RestconfPath, Transport};

use crate::error::CoreError;

pub use flow::{FLOW_NAMESPACE, FlowBody, FlowFamily, FlowScope};
pub use node::NodeFamily;

/// Root container of the OpenDaylight inventory.
pub const INVENTORY: &str = "opendaylight-inventory:nodes";

// ── Paths ───────────────────────────────────────────────────────────

/// RESTCONF datastore a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Datastore {
    /// State reported by the switches. All reads go here.
    Operational,
    /// Intended state. Writes go here.
    Config,
}

impl Datastore {
    pub fn prefix(self, path: &RestconfPath) -> RestconfPath {
        let mut prefixed = RestconfPath::new().child(self.to_string());
        prefixed.extend(path.segments().iter().cloned());
        prefixed
    }
}

/// `base/{parent}/{id}/.../{resource}` with one placeholder per parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate {
    base: &'static str,
    parents: &'static [&'static str],
    resource: &'static str,
}

impl PathTemplate {
    pub const fn new(
        base: &'static str,
        parents: &'static [&'static str],
        resource: &'static str,
    ) -> Self {
        Self {
            base,
            parents,
            resource,
        }
    }

    /// Number of parent ids the template expects.
    pub fn arity(&self) -> usize {
        self.parents.len()
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Collection prefix for the given parent ids. Each id is kept as a
    /// single segment whatever characters it holds.
    pub fn render(&self, parent_ids: &[String]) -> RestconfPath {
        debug_assert_eq!(parent_ids.len(), self.arity(), "parent id count");
        let mut path = RestconfPath::new().child(self.base);
        for (segment, id) in self.parents.iter().zip(parent_ids) {
            path.push(*segment);
            path.push(id.as_str());
        }
        path
    }
}

/// The parent ids that place a resource in the inventory tree.
pub trait ParentScope {
    fn parent_ids(&self) -> Vec<String>;
}

/// Top-level resources have no parents.
impl ParentScope for () {
    fn parent_ids(&self) -> Vec<String> {
        Vec::new()
    }
}

// ── Families ────────────────────────────────────────────────────────

/// Path template and response decoders for one kind of resource.
pub trait ResourceFamily {
    type Entity;
    type Scope: ParentScope;

    /// Entity name used in not-found errors.
    const NAME: &'static str;

    fn template() -> PathTemplate;

    /// Decode a collection response, preserving document order.
    fn decode_many(doc: &Value, scope: &Self::Scope) -> Result<Vec<Self::Entity>, CoreError>;

    /// Decode a single-item response. An empty wrapper is `NotFound`.
    fn decode_one(doc: &Value, id: &str, scope: &Self::Scope) -> Result<Self::Entity, CoreError>;
}

/// A family that can be created with a PUT.
pub trait WritableFamily: ResourceFamily {
    type Body;

    fn encode_body(id: &str, body: &Self::Body, scope: &Self::Scope)
    -> Result<RequestBody, CoreError>;
}

// ── Manager ─────────────────────────────────────────────────────────

/// Runs the list/get/create algorithm for family `F` over transport `T`.
pub struct ResourceManager<'c, F, T> {
    transport: &'c T,
    template: PathTemplate,
    _family: PhantomData<fn() -> F>,
}

impl<'c, F: ResourceFamily, T: Transport> ResourceManager<'c, F, T> {
    pub fn new(transport: &'c T) -> Self {
        Self {
            transport,
            template: F::template(),
            _family: PhantomData,
        }
    }

    /// Collection path for `scope`, without a datastore prefix.
    pub fn resource_type(&self, scope: &F::Scope) -> RestconfPath {
        self.template.render(&scope.parent_ids())
    }

    fn item_path(&self, id: &str, scope: &F::Scope) -> RestconfPath {
        self.resource_type(scope)
            .child(self.template.resource())
            .child(id)
    }

    async fn fetch(&self, path: &RestconfPath) -> Result<Value, CoreError> {
        let response = self.transport.get(path).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn list_all(&self, scope: &F::Scope) -> Result<Vec<F::Entity>, CoreError> {
        let path = Datastore::Operational.prefix(&self.resource_type(scope));
        debug!(family = F::NAME, %path, "listing");
        let doc = self.fetch(&path).await?;
        F::decode_many(&doc, scope)
    }

    pub async fn get(&self, id: &str, scope: &F::Scope) -> Result<F::Entity, CoreError> {
        let path = Datastore::Operational.prefix(&self.item_path(id, scope));
        debug!(family = F::NAME, %path, "fetching");
        let doc = self.fetch(&path).await?;
        F::decode_one(&doc, id, scope)
    }
}

impl<F: WritableFamily, T: Transport> ResourceManager<'_, F, T> {
    /// PUT a new resource. `Ok(false)` means the controller answered with a
    /// non-2xx status; transport failures are errors.
    pub async fn create(&self, id: &str, body: &F::Body, scope: &F::Scope) -> Result<bool, CoreError> {
        let request = F::encode_body(id, body, scope)?;
        let path = Datastore::Config.prefix(&self.item_path(id, scope));
        debug!(family = F::NAME, %path, "creating");

        let response = self.transport.put(&path, request).await?;
        if response.is_success() {
            info!(family = F::NAME, id, status = response.status, "created");
        } else {
            warn!(
                family = F::NAME,
                id,
                status = response.status,
                body = %response.body,
                "controller rejected create"
            );
        }
        Ok(response.is_success())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::future::Future;
    use std::sync::Mutex;

    use odlctl_api::HttpResponse;

    use super::*;

    /// Transport that answers every request with one canned response and
    /// records what it was asked.
    struct StubTransport {
        status: u16,
        body: String,
        calls: Mutex<Vec<(&'static str, RestconfPath, Option<RequestBody>)>>,
    }

    impl StubTransport {
        fn new(status: u16, body: impl Into<String>) -> Self {
            Self {
                status,
                body: body.into(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn respond(&self) -> HttpResponse {
            HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.clone(),
            }
        }
    }

    impl Transport for StubTransport {
        fn get(
            &self,
            path: &RestconfPath,
        ) -> impl Future<Output = Result<HttpResponse, odlctl_api::Error>> + Send {
            self.calls.lock().unwrap().push(("GET", path.clone(), None));
            let response = self.respond();
            async move { Ok(response) }
        }

        fn put(
            &self,
            path: &RestconfPath,
            body: RequestBody,
        ) -> impl Future<Output = Result<HttpResponse, odlctl_api::Error>> + Send {
            self.calls
                .lock()
                .unwrap()
                .push(("PUT", path.clone(), Some(body)));
            let response = self.respond();
            async move { Ok(response) }
        }
    }

    #[test]
    fn template_without_parents() {
        let t = PathTemplate::new(INVENTORY, &[], "node");
        assert_eq!(t.arity(), 0);
        assert_eq!(t.render(&[]).to_string(), "opendaylight-inventory:nodes");
    }

    #[test]
    fn template_with_parents() {
        let t = PathTemplate::new(INVENTORY, &["node", "table"], "flow");
        assert_eq!(
            t.render(&["openflow:1".into(), "0".into()]).to_string(),
            "opendaylight-inventory:nodes/node/openflow:1/table/0"
        );
        assert_eq!(t.resource(), "flow");
    }

    #[test]
    fn template_keeps_each_id_one_segment() {
        let t = PathTemplate::new(INVENTORY, &["node"], "table");
        let path = t.render(&["a/b?c#d".into()]);
        assert_eq!(path.segments(), ["opendaylight-inventory:nodes", "node", "a/b?c#d"]);
    }

    #[test]
    fn datastore_prefix() {
        let path: RestconfPath = ["a", "b"].into_iter().collect();
        assert_eq!(Datastore::Operational.prefix(&path).to_string(), "operational/a/b");
        assert_eq!(
            Datastore::Config.prefix(&RestconfPath::new().child("a")).to_string(),
            "config/a"
        );
    }

    #[tokio::test]
    async fn node_paths() {
        let stub = StubTransport::new(200, r#"{"node":[{"id":"openflow:1","flow-node-inventory:table":[],"node-connector":[]}]}"#);
        let nodes: ResourceManager<'_, NodeFamily, _> = ResourceManager::new(&stub);

        assert_eq!(nodes.resource_type(&()).to_string(), "opendaylight-inventory:nodes");
        let node = nodes.get("openflow:1", &()).await.unwrap();
        assert_eq!(node.id, "openflow:1");

        let calls = stub.calls.lock().unwrap();
        assert_eq!(
            calls[0].1.to_string(),
            "operational/opendaylight-inventory:nodes/node/openflow:1"
        );
    }

    #[tokio::test]
    async fn flow_create_puts_xml_into_config() {
        let stub = StubTransport::new(201, "");
        let flows: ResourceManager<'_, FlowFamily, _> = ResourceManager::new(&stub);
        let scope = FlowScope::new("openflow:1", 0);

        let created = flows.create("f1", &FlowBody::default(), &scope).await.unwrap();
        assert!(created);

        let calls = stub.calls.lock().unwrap();
        let (method, path, body) = &calls[0];
        assert_eq!(*method, "PUT");
        assert_eq!(
            path.to_string(),
            "config/opendaylight-inventory:nodes/node/openflow:1/table/0/flow/f1"
        );
        let body = body.as_ref().unwrap();
        assert_eq!(body.content_type, "application/xml");
        assert!(body.text.contains(r#"<flow xmlns="urn:opendaylight:flow:inventory">"#));
    }

    #[tokio::test]
    async fn flow_id_with_reserved_characters_stays_one_segment() {
        let stub = StubTransport::new(201, "");
        let flows: ResourceManager<'_, FlowFamily, _> = ResourceManager::new(&stub);

        flows
            .create("web?v=2", &FlowBody::default(), &FlowScope::new("openflow:1", 0))
            .await
            .unwrap();

        let calls = stub.calls.lock().unwrap();
        let segments = calls[0].1.segments();
        assert_eq!(segments.len(), 8);
        assert_eq!(segments[6], "flow");
        assert_eq!(segments[7], "web?v=2");
    }

    #[tokio::test]
    async fn rejected_create_is_false() {
        let stub = StubTransport::new(400, "bad-element");
        let flows: ResourceManager<'_, FlowFamily, _> = ResourceManager::new(&stub);
        let created = flows
            .create("f1", &FlowBody::default(), &FlowScope::new("openflow:1", 0))
            .await
            .unwrap();
        assert!(!created);
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let stub = StubTransport::new(200, "<html/>");
        let nodes: ResourceManager<'_, NodeFamily, _> = ResourceManager::new(&stub);
        assert!(matches!(
            nodes.list_all(&()).await,
            Err(CoreError::Json { .. })
        ));
    }
}
