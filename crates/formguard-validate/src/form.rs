//! Form context: what rules may learn about sibling controls.

use crate::field::{FieldAdapter, FieldKind};
use serde::{Deserialize, Serialize};

/// Read-only view of the whole form, used by cross-field rules.
///
/// `required` on radios asks whether any same-named control is checked,
/// `mincheck`/`maxcheck` count checked controls in a checkgroup and
/// `equalto` reads another field's value.
pub trait FormContext {
    /// Whether any control named `name` is checked.
    fn any_checked(&self, name: &str) -> bool;

    /// Number of checked controls in `group`.
    ///
    /// A control belongs to its checkgroup, or to its name when it has none.
    fn count_checked(&self, group: &str) -> usize;

    /// Current value of the first control named `name`.
    fn value_of(&self, name: &str) -> Option<String>;
}

/// State of one control as seen by a [`FormSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    pub checked: bool,
    pub checkgroup: Option<String>,
}

impl ControlState {
    /// Capture a control from a field adapter.
    pub fn capture<F: FieldAdapter + ?Sized>(field: &F) -> Self {
        Self {
            name: field.name().to_string(),
            value: field.value(),
            kind: field.kind(),
            checked: field.is_checked(),
            checkgroup: field.checkgroup().map(str::to_string),
        }
    }

    fn group(&self) -> &str {
        self.checkgroup.as_deref().unwrap_or(&self.name)
    }
}

/// A [`FormContext`] backed by captured control states.
///
/// `validate_form` captures one from the field list before the run and keeps
/// it in step with normalized values while fields are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    controls: Vec<ControlState>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every field of a form, in order.
    pub fn capture<F: FieldAdapter>(fields: &[F]) -> Self {
        Self {
            controls: fields.iter().map(ControlState::capture).collect(),
        }
    }

    /// Add a control that is part of the form but not validated itself.
    pub fn push(&mut self, control: ControlState) {
        self.controls.push(control);
    }

    pub fn with_control(mut self, control: ControlState) -> Self {
        self.push(control);
        self
    }

    /// Replace the captured value of the control at `index`.
    pub fn set_value(&mut self, index: usize, value: String) {
        if let Some(control) = self.controls.get_mut(index) {
            control.value = value;
        }
    }

    pub fn controls(&self) -> &[ControlState] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl FormContext for FormSnapshot {
    fn any_checked(&self, name: &str) -> bool {
        self.controls
            .iter()
            .any(|control| control.name == name && control.checked)
    }

    fn count_checked(&self, group: &str) -> usize {
        self.controls
            .iter()
            .filter(|control| control.checked && control.group() == group)
            .count()
    }

    fn value_of(&self, name: &str) -> Option<String> {
        self.controls
            .iter()
            .find(|control| control.name == name)
            .map(|control| control.value.clone())
    }
}
