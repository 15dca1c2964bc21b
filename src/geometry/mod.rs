pub mod origin;
pub mod panel;
pub mod span;

pub use origin::PanelOrigin;
pub use panel::Panel;
pub use span::Span;
