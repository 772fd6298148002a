//! Wires: server-rendered templates connected to Alpine.js, with the page
//! handler doubling as its own JSON endpoint.
//!
//! A handler builds its defaults and hands them to [`Wires::handle`] along
//! with a transform:
//!
//! ```ignore
//! fn names(wires: &mut Wires<'_>) -> Result<String, WiresError> {
//!     let defaults = fields::from_json(json!({"fname": "First", "lname": "Last"}));
//!     wires.handle(defaults, |mut res| {
//!         res.insert("lname".into(), "Doe".into());
//!         Ok(Some(res))
//!     })
//! }
//! ```
//!
//! On a normal page load the template named after the request path is
//! rendered with the defaults and the transform is not called. When the
//! rendered page posts back (`POST <path>?_wired_`), the posted JSON is
//! merged over the defaults and the transform's result is returned as JSON.
//!
//! Template tags:
//!
//! ```html
//! <div {{_wire_}}>
//!     <p>{{lname}}, {{fname}}</p>
//!     <input {{_wire_input_}} type="text" name="fname" />
//!     <button {{_wire_button_}} data-fname="First" data-lname="Last">Reset</button>
//! </div>
//! ```

mod error;
pub mod fields;
pub mod filter;
pub mod mode;
pub mod setup;

pub use error::{error, WireError, WiresError};
pub use fields::{BodyError, FieldSet};
pub use filter::WireFilter;
pub use mode::{query_has_marker, resolve, RequestMode};

use hyper::Method;

use crate::config::WiresConfig;
use crate::handler::Page;
use crate::logger;
use crate::template::TemplateEngine;
use error::ErrorBody;

/// What a transform returns: new fields, `None` for "no changes", or an error
pub type Reply = Result<Option<FieldSet>, WireError>;

/// The parts of an incoming request the wiring layer looks at
#[derive(Debug, Clone, Copy)]
pub struct WireRequest<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub body: &'a [u8],
}

/// Request-scoped wiring context.
///
/// Created once per request; owns the mode, the render counter and the
/// endpoint for that request only.
pub struct Wires<'a> {
    mode: RequestMode,
    counter: u32,
    endpoint: String,
    body: &'a [u8],
    page: &'a mut Page,
    templates: &'a TemplateEngine,
    settings: &'a WiresConfig,
}

impl<'a> Wires<'a> {
    /// Resolve the request mode and configure the page for it
    pub fn init(
        request: &WireRequest<'a>,
        page: &'a mut Page,
        templates: &'a TemplateEngine,
        settings: &'a WiresConfig,
    ) -> Self {
        let marker = query_has_marker(request.query, &settings.marker);
        let mode = resolve(marker, request.method);
        mode.apply(page, settings);

        Self {
            mode,
            counter: 1,
            endpoint: request.path.trim_matches('/').to_string(),
            body: request.body,
            page,
            templates,
            settings,
        }
    }

    pub const fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Counter the next render will use
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Template name and API path of this page, without slashes
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn page(&mut self) -> &mut Page {
        &mut *self.page
    }

    /// Render the page, or answer the API call, depending on the mode
    pub fn handle<F>(&mut self, defaults: FieldSet, transform: F) -> Result<String, WiresError>
    where
        F: FnOnce(FieldSet) -> Reply,
    {
        match self.mode {
            RequestMode::InitialRender => self.render(&defaults),
            RequestMode::ApiCall => self.call(defaults, transform),
        }
    }

    fn render(&mut self, data: &FieldSet) -> Result<String, WiresError> {
        let endpoint = self.endpoint.clone();
        self.render_template(&endpoint, data)
    }

    /// Render `template` as a wired region; usable more than once per page
    pub fn render_template(&mut self, template: &str, data: &FieldSet) -> Result<String, WiresError> {
        let counter = self.counter;
        let mut out = self
            .templates
            .render(template, data, &WireFilter::new(counter))?;
        out.push_str(&setup::render(
            self.templates,
            counter,
            data,
            &self.endpoint,
            &self.settings.marker,
        )?);
        self.counter += 1;
        Ok(out)
    }

    fn call<F>(&mut self, defaults: FieldSet, transform: F) -> Result<String, WiresError>
    where
        F: FnOnce(FieldSet) -> Reply,
    {
        let params = match fields::decode_body(self.body) {
            Ok(posted) => fields::merge(defaults, posted),
            Err(e) if self.settings.strict_json => {
                logger::log_warning(&format!("/{}: rejecting request body: {e}", self.endpoint));
                return self.fail(&WireError::new(400, "Malformed JSON body"));
            }
            Err(e) => {
                logger::log_warning(&format!(
                    "/{}: ignoring request body, using defaults: {e}",
                    self.endpoint
                ));
                defaults
            }
        };

        match transform(params.clone()) {
            Ok(Some(res)) => Ok(serde_json::to_string(&res)?),
            Ok(None) => Ok(serde_json::to_string(&params)?),
            Err(err) => self.fail(&err),
        }
    }

    fn fail(&mut self, err: &WireError) -> Result<String, WiresError> {
        logger::log_wire_error(err.code, &err.message);
        self.page.set_status(err.code, &err.message);
        Ok(serde_json::to_string(&ErrorBody::from(err))?)
    }
}
