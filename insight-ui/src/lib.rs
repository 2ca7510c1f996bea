pub mod callback;
pub mod chart;
pub mod dialog;
pub mod error;
pub mod speech;
pub mod summary;
pub mod summary_modal;
pub mod theme;
pub mod wakeup;

pub use callback::Callback;
pub use chart::BarChart;
pub use dialog::{Dialog, DialogState, DialogTransition, DialogWidth};
pub use error::SpeechError;
pub use speech::{
    CommandEngine, Lang, Narrator, SilentEngine, SpeechEngine, SpeechEvent, SpeechEvents,
    Utterance, UtteranceId,
};
pub use summary::{chart_data, narration, ChartPoint, Metric, SummaryData};
pub use summary_modal::{SummaryAction, SummaryModal};
pub use wakeup::{WakeupReceiver, WakeupSender};
