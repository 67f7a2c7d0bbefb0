//! Flow step results shared by the options flow and the OAuth config flow

use serde::{Deserialize, Serialize};
use serde_json::Value;
use spotifyplus_core::names::DOMAIN;
use std::collections::HashMap;

/// Kind of step a flow produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowResultType {
    Form,
    CreateEntry,
    Abort,
    ExternalStep,
}

/// Result of one flow step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowResult {
    pub flow_id: String,
    /// Integration domain
    pub handler: String,
    #[serde(rename = "type")]
    pub result_type: FlowResultType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    /// Always present, empty unless a form is shown
    pub data_schema: Vec<FormField>,
    /// Errors from the previous submission, null if none
    pub errors: Option<HashMap<String, String>>,
    pub description_placeholders: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Entry data for `create_entry`, continuation data for `external_step`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Controls submit vs next in the frontend
    pub last_step: Option<bool>,
}

impl FlowResult {
    fn new(flow_id: &str, result_type: FlowResultType) -> Self {
        Self {
            flow_id: flow_id.to_string(),
            handler: DOMAIN.to_string(),
            result_type,
            step_id: None,
            data_schema: Vec::new(),
            errors: None,
            description_placeholders: None,
            title: None,
            reason: None,
            version: None,
            result: None,
            last_step: None,
        }
    }

    /// Show a form for `step_id`
    pub fn form(flow_id: &str, step_id: &str, data_schema: Vec<FormField>) -> Self {
        Self {
            step_id: Some(step_id.to_string()),
            data_schema,
            ..Self::new(flow_id, FlowResultType::Form)
        }
    }

    /// Finish the flow with an entry
    pub fn create_entry(flow_id: &str, title: impl Into<String>, data: Value) -> Self {
        Self {
            title: Some(title.into()),
            result: Some(data),
            ..Self::new(flow_id, FlowResultType::CreateEntry)
        }
    }

    /// Finish the flow without an entry
    pub fn abort(flow_id: &str, reason: &str) -> Self {
        Self {
            reason: Some(reason.to_string()),
            ..Self::new(flow_id, FlowResultType::Abort)
        }
    }

    /// Hand the flow to an external step, e.g. the OAuth authorize page
    pub fn external_step(flow_id: &str, step_id: &str, data: Value) -> Self {
        Self {
            step_id: Some(step_id.to_string()),
            result: Some(data),
            ..Self::new(flow_id, FlowResultType::ExternalStep)
        }
    }

    /// Set `errors.base`
    pub fn with_base_error(mut self, error: &str) -> Self {
        self.errors = Some(HashMap::from([("base".to_string(), error.to_string())]));
        self
    }

    /// Values substituted into the step description
    pub fn with_placeholders<I, K, V>(mut self, placeholders: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.description_placeholders = Some(
            placeholders
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Whether the form submits (`true`) or moves on
    pub fn with_last_step(mut self, last_step: bool) -> Self {
        self.last_step = Some(last_step);
        self
    }

    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    /// Entry version of a created entry
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// `errors.base`, if set
    pub fn base_error(&self) -> Option<&str> {
        self.errors.as_ref()?.get("base").map(String::as_str)
    }

    pub fn is_form(&self, step_id: &str) -> bool {
        self.result_type == FlowResultType::Form && self.step_id.as_deref() == Some(step_id)
    }
}

/// Form field schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Choices for select fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FormField {
    /// Optional field of `field_type`
    pub fn new(name: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            required: Some(false),
            default: None,
            options: Vec::new(),
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, "string")
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(name, "boolean")
    }

    pub fn integer(name: &str) -> Self {
        Self::new(name, "integer")
    }

    /// Single choice out of `options`
    pub fn select(name: &str, options: Vec<String>) -> Self {
        Self {
            options,
            ..Self::new(name, "select")
        }
    }

    pub fn multi_select(name: &str, options: Vec<String>) -> Self {
        Self {
            options,
            ..Self::new(name, "multi_select")
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Default shown in the form; null values leave the field empty
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        let default = default.into();
        self.default = (!default.is_null()).then_some(default);
        self
    }
}
