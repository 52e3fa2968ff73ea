//! Generic modal form: labelled inputs bound to field names, a save button and a cancel button

use crate::coerce::coerce;
use crate::error::AdminError;
use crate::notification::{Notification, Notifications};
use crate::widget::{FieldValues, FormColumn, InputBinding, InputWidget, collect_values};
use log::error;
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::rc::Rc;

pub const UPDATE_OPERATION_COMPLETED: &str = "Update Operation Completed";
pub const FAILED_TO_PERFORM_UPDATE: &str = "Failed to perform update";

type SaveListener = Box<dyn FnMut(FieldValues) -> Result<(), AdminError>>;

/// Enabled state of the save button, shared with whoever renders it
#[derive(Debug, Clone)]
pub struct SaveControl(Rc<Cell<bool>>);

impl SaveControl {
    fn new() -> Self {
        SaveControl(Rc::new(Cell::new(true)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.get()
    }

    fn set_enabled(&self, enabled: bool) {
        self.0.set(enabled);
    }
}

/// Disables the save control until dropped
struct DisabledWhileSaving(SaveControl);

impl DisabledWhileSaving {
    fn new(control: &SaveControl) -> Self {
        control.set_enabled(false);
        DisabledWhileSaving(control.clone())
    }
}

impl Drop for DisabledWhileSaving {
    fn drop(&mut self) {
        self.0.set_enabled(true);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed,
    /// Save pressed while a save was already running, or before any listener was added
    Ignored,
}

pub struct EditDialog {
    title: String,
    bindings: Vec<InputBinding>,
    save_control: SaveControl,
    open: bool,
    listener: Option<SaveListener>,
    on_success: Box<dyn FnMut()>,
    notifications: Notifications,
}

impl EditDialog {
    pub fn new(title: &str, notifications: Notifications) -> Self {
        Self {
            title: title.to_string(),
            bindings: Vec::new(),
            save_control: SaveControl::new(),
            open: false,
            listener: None,
            on_success: Box::new(|| {}),
            notifications,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn show(&mut self) -> &mut Self {
        self.open = true;
        self
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn on_success<F: FnMut() + 'static>(&mut self, on_success: F) {
        self.on_success = Box::new(on_success);
    }

    pub fn save_control(&self) -> SaveControl {
        self.save_control.clone()
    }

    pub fn add_left_component(&mut self, field: &str, widget: InputWidget) {
        self.bind(field, widget, FormColumn::Left);
    }

    pub fn add_right_component(&mut self, field: &str, widget: InputWidget) {
        self.bind(field, widget, FormColumn::Right);
    }

    fn bind(&mut self, field: &str, widget: InputWidget, column: FormColumn) {
        self.bindings.push(InputBinding {
            field: field.to_string(),
            widget,
            column,
        });
    }

    pub fn bindings(&self) -> &[InputBinding] {
        &self.bindings
    }

    pub fn column(&self, column: FormColumn) -> impl Iterator<Item = &InputBinding> {
        self.bindings.iter().filter(move |b| b.column == column)
    }

    pub fn widget_mut(&mut self, field: &str) -> Option<&mut InputWidget> {
        self.bindings
            .iter_mut()
            .find(|b| b.field == field)
            .map(|b| &mut b.widget)
    }

    pub fn collect_values(&self) -> FieldValues {
        collect_values(&self.bindings)
    }

    /// Listener that receives the collected values untouched
    pub fn add_raw_map_save_listener<F>(&mut self, listener: F)
    where
        F: FnMut(FieldValues) -> Result<(), AdminError> + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Listener that receives the collected values converted into `T`
    pub fn add_save_listener<T, F>(&mut self, mut listener: F)
    where
        T: DeserializeOwned + 'static,
        F: FnMut(T) -> Result<(), AdminError> + 'static,
    {
        self.listener = Some(Box::new(move |values: FieldValues| {
            let record = coerce::<T>(&values).inspect_err(|e| {
                error!(
                    "Failed to convert values to target type {}: {}",
                    std::any::type_name::<T>(),
                    e
                );
            })?;
            listener(record)
        }));
    }

    /// Press the save button. Runs the listener synchronously with the save
    /// control disabled; the control is re-enabled on every exit path.
    pub fn save(&mut self) -> SaveOutcome {
        if !self.save_control.is_enabled() {
            return SaveOutcome::Ignored;
        }
        let values = self.collect_values();
        let Some(listener) = self.listener.as_mut() else {
            return SaveOutcome::Ignored;
        };

        let result = {
            let _disabled = DisabledWhileSaving::new(&self.save_control);
            listener(values)
        };

        match result {
            Ok(()) => {
                self.notifications
                    .show(Notification::info(UPDATE_OPERATION_COMPLETED));
                (self.on_success)();
                SaveOutcome::Saved
            }
            Err(e) => {
                log::warn!("{} '{}': {}", FAILED_TO_PERFORM_UPDATE, self.title, e);
                self.notifications
                    .show(Notification::error(FAILED_TO_PERFORM_UPDATE));
                SaveOutcome::Failed
            }
        }
    }
}
