//! Analytics over collected datasets

pub mod word_cloud;

pub use word_cloud::{render_svg, CloudLayout, RenderError, WordFrequencies, MIN_WORD_LENGTH};
