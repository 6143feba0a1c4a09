use std::fmt;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_APP_REF: &str = "apirelay.app:router";

pub type RouterFactory = fn() -> Router;

// Registered application entry points, keyed by "module" and attribute the
// same way an ASGI runtime addresses its application object.
const REGISTRY: &[(&str, &str, RouterFactory)] = &[("apirelay.app", "router", router)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRef {
	pub module: String,
	pub attr: String,
}

#[derive(Error, Debug)]
pub enum AppError {
	#[error("invalid application reference {given:?}, expected \"module:attribute\"")]
	InvalidReference { given: String },

	#[error("no application module named {module:?} is registered")]
	ModuleNotFound { module: String },

	#[error("application module {module:?} has no attribute {attr:?}")]
	AttrNotFound { module: String, attr: String },
}

impl AppRef {
	pub fn parse(raw: &str) -> Result<Self, AppError> {
		let Some((module, attr)) = raw.split_once(':') else {
			return Err(AppError::InvalidReference {
				given: raw.to_string(),
			});
		};

		if module.is_empty() || attr.is_empty() {
			return Err(AppError::InvalidReference {
				given: raw.to_string(),
			});
		}

		Ok(Self {
			module: module.to_string(),
			attr: attr.to_string(),
		})
	}
}

impl fmt::Display for AppRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.module, self.attr)
	}
}

pub fn resolve(app_ref: &AppRef) -> Result<RouterFactory, AppError> {
	let mut module_seen = false;

	for (module, attr, factory) in REGISTRY {
		if *module != app_ref.module {
			continue;
		}
		module_seen = true;
		if *attr == app_ref.attr {
			return Ok(*factory);
		}
	}

	if module_seen {
		Err(AppError::AttrNotFound {
			module: app_ref.module.clone(),
			attr: app_ref.attr.clone(),
		})
	} else {
		Err(AppError::ModuleNotFound {
			module: app_ref.module.clone(),
		})
	}
}

#[derive(Serialize)]
struct ServiceStatus {
	service: &'static str,
	version: &'static str,
}

pub fn router() -> Router {
	Router::new()
		.route("/", get(status))
		.route("/healthz", get(healthz))
}

async fn healthz() -> &'static str {
	"ok"
}

async fn status() -> Json<ServiceStatus> {
	Json(ServiceStatus {
		service: env!("CARGO_PKG_NAME"),
		version: env!("CARGO_PKG_VERSION"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_splits_module_and_attribute() {
		let app_ref = AppRef::parse("apirelay.app:router").expect("valid reference");
		assert_eq!(app_ref.module, "apirelay.app");
		assert_eq!(app_ref.attr, "router");
		assert_eq!(app_ref.to_string(), "apirelay.app:router");
	}

	#[test]
	fn parse_rejects_missing_separator() {
		let err = AppRef::parse("apirelay.app").expect_err("no separator");
		assert!(matches!(err, AppError::InvalidReference { .. }));
	}

	#[test]
	fn parse_rejects_empty_halves() {
		assert!(AppRef::parse(":router").is_err());
		assert!(AppRef::parse("apirelay.app:").is_err());
	}

	#[test]
	fn resolve_finds_default_application() {
		let app_ref = AppRef::parse(DEFAULT_APP_REF).expect("default reference");
		resolve(&app_ref).expect("default application must resolve");
	}

	#[test]
	fn resolve_reports_unknown_module() {
		let app_ref = AppRef::parse("missing.module:app").expect("valid reference");
		let err = resolve(&app_ref).expect_err("unknown module");
		assert!(matches!(err, AppError::ModuleNotFound { .. }));
		assert!(err.to_string().contains("missing.module"));
	}

	#[test]
	fn resolve_reports_unknown_attribute() {
		let app_ref = AppRef::parse("apirelay.app:missing").expect("valid reference");
		let err = resolve(&app_ref).expect_err("unknown attribute");
		assert!(matches!(err, AppError::AttrNotFound { .. }));
		assert!(err.to_string().contains("missing"));
	}
}
