// Dual rendering pipeline: one section-visibility policy, two views.
// The preview (continuous HTML) and the paginated document both consume
// `policy::visible_sections`, so they cannot disagree on which sections
// appear or in what order.

pub mod document;
pub mod font_metrics;
pub mod policy;
pub mod preview;

pub use document::{DocumentRenderer, PaginatedDocument};
pub use font_metrics::{page_config_for, FontFamily, PageConfig};
pub use policy::{visible_sections, Section};
pub use preview::render_preview;
