use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::future::Future;

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::validation::FormField;

/// Static description of one form: its fields, rules and messages.
pub struct FormSchema {
    pub name: &'static str,
    pub fields: &'static [FormField],
    pub validator: fn(FormField, &str) -> Option<&'static str>,
    pub success_message: &'static str,
    pub fallback_error: &'static str,
}

impl fmt::Debug for FormSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSchema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Snapshot of the values handed to the network call. Trimmed where the field
/// asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues(BTreeMap<FormField, String>);

impl FormValues {
    pub fn get(&self, field: FormField) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn owned(&self, field: FormField) -> String {
        self.get(field).to_string()
    }
}

#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// Local validation failed; nothing was sent.
    Invalid,
    /// A submission is already in flight.
    Busy,
    Succeeded(T),
    Failed(ApiError),
}

impl<T> SubmitOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

/// Mutable state behind a form screen.
#[derive(Debug)]
pub struct FormController {
    schema: &'static FormSchema,
    values: BTreeMap<FormField, String>,
    touched: BTreeSet<FormField>,
    errors: BTreeMap<FormField, &'static str>,
    error_message: Option<String>,
    success_message: Option<String>,
    loading: bool,
}

impl FormController {
    pub fn new(schema: &'static FormSchema) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
            touched: BTreeSet::new(),
            errors: BTreeMap::new(),
            error_message: None,
            success_message: None,
            loading: false,
        }
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    pub fn fields(&self) -> &'static [FormField] {
        self.schema.fields
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Store a value and drop any error the field was showing.
    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        if !self.schema.fields.contains(&field) {
            return;
        }
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    pub fn blur(&mut self, field: FormField) -> Option<&'static str> {
        if !self.schema.fields.contains(&field) {
            return None;
        }
        self.touched.insert(field);
        self.check(field)
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validate every field and mark them all touched.
    pub fn validate_all(&mut self) -> bool {
        let mut valid = true;
        for field in self.schema.fields {
            self.touched.insert(*field);
            if self.check(*field).is_some() {
                valid = false;
            }
        }
        valid
    }

    pub fn values(&self) -> FormValues {
        FormValues(
            self.schema
                .fields
                .iter()
                .map(|field| {
                    let raw = self.value(*field);
                    let value = if field.is_trimmed() { raw.trim() } else { raw };
                    (*field, value.to_string())
                })
                .collect(),
        )
    }

    /// Validate, then make exactly one call through `send` when the form is valid.
    pub async fn submit<T, F, Fut>(&mut self, send: F) -> SubmitOutcome<T>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if self.loading {
            return SubmitOutcome::Busy;
        }

        self.error_message = None;
        self.success_message = None;
        if !self.validate_all() {
            return SubmitOutcome::Invalid;
        }

        self.loading = true;
        let result = send(self.values()).await;
        self.loading = false;

        match result {
            Ok(value) => {
                info!(form = self.schema.name, "form submitted");
                self.reset();
                self.success_message = Some(self.schema.success_message.to_string());
                SubmitOutcome::Succeeded(value)
            }
            Err(err) if err.is_cancelled() => {
                debug!(form = self.schema.name, "form submission cancelled");
                SubmitOutcome::Failed(err)
            }
            Err(err) => {
                warn!(form = self.schema.name, error = %err, "form submission failed");
                self.error_message = Some(err.user_message(self.schema.fallback_error));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Clear values, touched flags and field errors.
    pub fn reset(&mut self) {
        self.values.clear();
        self.touched.clear();
        self.errors.clear();
    }

    fn check(&mut self, field: FormField) -> Option<&'static str> {
        match (self.schema.validator)(field, self.value(field)) {
            Some(message) => {
                self.errors.insert(field, message);
                Some(message)
            }
            None => {
                self.errors.remove(&field);
                None
            }
        }
    }
}
