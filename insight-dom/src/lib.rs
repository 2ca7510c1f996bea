pub mod a11y;
pub mod buffer;
pub mod dispatch;
pub mod document;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod motion;
pub mod presence;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;

pub use a11y::{A11yError, Aria, Role};
pub use buffer::{Buffer, Cell};
pub use dispatch::{dispatch_click, ClickEvent, DispatchOutcome};
pub use document::{Document, ListenerGuard, ListenerId};
pub use element::{find_element, text_content, Content, CustomContent, Element};
pub use event::{convert_event, Event, Key, KeyEvent, Modifiers, MouseButton};
pub use hit::{hit_path, hit_test};
pub use layout::{layout, LayoutResult, Rect};
pub use motion::{Easing, Motion};
pub use presence::{Presence, PresenceChange, PresencePhase, TrackId};
pub use render::render_to_buffer;
pub use terminal::Terminal;
pub use types::*;
