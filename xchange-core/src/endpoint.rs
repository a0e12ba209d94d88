//! Declarative endpoint tables.
//!
//! Each exchange describes its REST surface as static data: base URLs per namespace, the
//! paths available per HTTP verb, and which namespaces require signing. [`EndpointTable`]
//! compiles that catalog once into an immutable lookup keyed by
//! `(namespace, verb, camelName)`, and [`ApiClient`] dispatches calls through it.
//!
//! ```rust
//! use xchange_core::base_exchange::ExchangeConfig;
//! use xchange_core::endpoint::{ApiCatalog, EndpointTable};
//! use xchange_core::signed_request::HttpMethod;
//!
//! static CATALOG: ApiCatalog = ApiCatalog {
//!     urls: &[("public", "https://api.gdax.com")],
//!     api: &[("public", &[(HttpMethod::Get, &["/products/{id}/book"])])],
//!     signed: &[],
//! };
//!
//! let table = EndpointTable::compile(&CATALOG, &ExchangeConfig::default()).unwrap();
//! let endpoint = table.get("public", HttpMethod::Get, "productsIdBook").unwrap();
//! assert_eq!(endpoint.path, "/products/{id}/book");
//! ```

use crate::base_exchange::ExchangeConfig;
use crate::credentials::{RequiredCredentials, check_required_credentials};
use crate::error::{Error, Result};
use crate::signed_request::{HttpMethod, SigningContext, SigningStrategy};
use crate::transport::{HttpRequest, Transport};
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Static REST catalog of one exchange.
#[derive(Debug)]
pub struct ApiCatalog {
    /// Base URL per namespace.
    pub urls: &'static [(&'static str, &'static str)],
    /// Paths per namespace and HTTP verb.
    pub api: &'static [(&'static str, &'static [(HttpMethod, &'static [&'static str])])],
    /// Namespaces whose endpoints are signed.
    pub signed: &'static [&'static str],
}

impl ApiCatalog {
    /// Default base URL of a namespace.
    pub fn url(&self, namespace: &str) -> Option<&'static str> {
        self.urls
            .iter()
            .find(|(ns, _)| *ns == namespace)
            .map(|(_, url)| *url)
    }

    /// Whether a namespace is signed.
    pub fn is_signed(&self, namespace: &str) -> bool {
        self.signed.contains(&namespace)
    }
}

/// One compiled endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Namespace, e.g. `public`.
    pub namespace: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path template, possibly with `{placeholder}` segments.
    pub path: String,
    /// Camel-cased path used as the lookup name.
    pub name: String,
    /// Base URL after overrides.
    pub base_url: String,
    /// Whether calls are signed.
    pub signed: bool,
}

/// Immutable lookup built from an [`ApiCatalog`].
#[derive(Debug, Clone, Default)]
pub struct EndpointTable {
    entries: HashMap<(String, HttpMethod, String), Endpoint>,
}

impl EndpointTable {
    /// Compiles every `(namespace, verb, path)` triple of the catalog.
    ///
    /// Base URLs honour `config.url_overrides`.
    pub fn compile(catalog: &ApiCatalog, config: &ExchangeConfig) -> Result<Self> {
        let mut entries = HashMap::new();
        for (namespace, verbs) in catalog.api {
            let default_url = catalog.url(namespace).ok_or_else(|| {
                Error::configuration(format!("No base URL for API namespace `{namespace}`"))
            })?;
            let base_url = config.base_url(namespace, default_url).trim_end_matches('/');
            let signed = catalog.is_signed(namespace);

            for (method, paths) in *verbs {
                for path in *paths {
                    let name = camel_case(path);
                    let endpoint = Endpoint {
                        namespace: (*namespace).to_string(),
                        method: *method,
                        path: (*path).to_string(),
                        name: name.clone(),
                        base_url: base_url.to_string(),
                        signed,
                    };
                    entries.insert(((*namespace).to_string(), *method, name), endpoint);
                }
            }
        }
        Ok(Self { entries })
    }

    /// Looks up an endpoint.
    pub fn get(&self, namespace: &str, method: HttpMethod, name: &str) -> Result<&Endpoint> {
        self.entries
            .get(&(namespace.to_string(), method, name.to_string()))
            .ok_or_else(|| {
                Error::not_supported(format!("{namespace}.{}.{name}", method.verb()))
            })
    }

    /// Number of endpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was compiled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All endpoints, unordered.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.entries.values()
    }
}

/// Camel-cases a REST path: `/ticker/24hr` becomes `ticker24Hr`.
///
/// Every non-alphanumeric character separates words, and a letter following a digit
/// starts a new word.
pub fn camel_case(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for word in path.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut prev_digit = false;
        for (i, c) in word.chars().enumerate() {
            let starts_word = i == 0 || (prev_digit && c.is_ascii_alphabetic());
            if starts_word && !out.is_empty() {
                out.push(c.to_ascii_uppercase());
            } else if out.is_empty() {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
            prev_digit = c.is_ascii_digit();
        }
    }
    out
}

/// Replaces each `{placeholder}` with the matching field.
pub fn resolve_path(template: &str, fields: &HashMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let end = tail.find('}').ok_or_else(|| {
            Error::invalid_request(format!("Unterminated placeholder in path {template}"))
        })?;
        let key = &tail[..end];
        let value = fields.get(key).ok_or_else(|| {
            Error::invalid_request(format!("Missing path field `{key}` for {template}"))
        })?;
        out.push_str(&urlencoding::encode(value));
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Arguments of one endpoint call.
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    /// Query parameters.
    pub params: BTreeMap<String, String>,
    /// JSON body.
    pub data: Option<Value>,
    /// Path placeholder values.
    pub fields: HashMap<String, String>,
}

impl RequestDescriptor {
    /// Empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Adds a query parameter when `value` is present.
    #[must_use]
    pub fn optional_param<T: ToString>(self, key: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Merges caller-supplied parameters; existing keys are overwritten.
    #[must_use]
    pub fn extend(mut self, params: Option<&HashMap<String, String>>) -> Self {
        if let Some(params) = params {
            self.params
                .extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        self
    }

    /// Sets a path placeholder.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Dispatches endpoint calls, signing where the namespace requires it.
#[derive(Clone)]
pub struct ApiClient {
    exchange_id: String,
    table: Arc<EndpointTable>,
    transport: Arc<dyn Transport>,
    signer: Arc<dyn SigningStrategy>,
    config: Arc<ExchangeConfig>,
    required: RequiredCredentials,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("exchange_id", &self.exchange_id)
            .field("endpoints", &self.table.len())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client over a compiled table.
    pub fn new(
        table: EndpointTable,
        transport: Arc<dyn Transport>,
        signer: Arc<dyn SigningStrategy>,
        config: Arc<ExchangeConfig>,
        required: RequiredCredentials,
    ) -> Self {
        Self {
            exchange_id: config.id.clone(),
            table: Arc::new(table),
            transport,
            signer,
            config,
            required,
        }
    }

    /// The compiled table.
    pub fn table(&self) -> &EndpointTable {
        &self.table
    }

    /// Calls an endpoint.
    ///
    /// Signed endpoints check credentials before any I/O.
    #[instrument(
        name = "api_call",
        skip(self, request),
        fields(exchange = %self.exchange_id, method = %method)
    )]
    pub async fn call(
        &self,
        namespace: &str,
        method: HttpMethod,
        name: &str,
        request: RequestDescriptor,
    ) -> Result<Value> {
        let endpoint = self.table.get(namespace, method, name)?;
        let path = resolve_path(&endpoint.path, &request.fields)?;

        let mut http = HttpRequest {
            method,
            url: format!("{}{path}", endpoint.base_url),
            params: request.params.into_iter().collect(),
            body: request.data,
            headers: HeaderMap::new(),
            signed: endpoint.signed,
        };

        if endpoint.signed {
            check_required_credentials(&self.exchange_id, self.config.as_ref(), self.required)?;

            let mut ctx = SigningContext::new(method, http.url.clone())?;
            ctx.params = std::mem::take(&mut http.params);
            ctx.body = http.body.take();
            self.signer.prepare_request(&mut ctx).await?;
            self.signer.add_auth_headers(&mut http.headers, &ctx)?;
            http.params = ctx.params;
            http.body = ctx.body;
        }

        debug!(url = %http.url, signed = http.signed, "Calling {namespace}.{name}");
        self.transport.request(http).await
    }

    /// GET shorthand.
    pub async fn get(&self, namespace: &str, name: &str, request: RequestDescriptor) -> Result<Value> {
        self.call(namespace, HttpMethod::Get, name, request).await
    }

    /// POST shorthand.
    pub async fn post(&self, namespace: &str, name: &str, request: RequestDescriptor) -> Result<Value> {
        self.call(namespace, HttpMethod::Post, name, request).await
    }

    /// DELETE shorthand.
    pub async fn delete(
        &self,
        namespace: &str,
        name: &str,
        request: RequestDescriptor,
    ) -> Result<Value> {
        self.call(namespace, HttpMethod::Delete, name, request).await
    }
}
