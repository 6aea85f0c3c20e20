//! Events flowing from the advisory backend worker to the UI thread.

use shared::domain::AdvisoryKind;

pub enum UiEvent {
    /// A form entered its pending state: swap label for spinner, disable the
    /// trigger.
    FormPending(AdvisoryKind),
    /// A form settled: restore the label and re-enable the trigger.
    FormIdle(AdvisoryKind),
    /// Plain-text payload for the form's result region.
    ResultText { kind: AdvisoryKind, text: String },
    /// Pre-rendered markup fragment for the form's result region, displayed
    /// without interpretation.
    ResultMarkup { kind: AdvisoryKind, markup: String },
    /// Blocking notification to surface as a modal dialog.
    Alert(String),
    Info(String),
}
