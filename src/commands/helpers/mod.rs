mod formatting;

pub(crate) use formatting::{PresentedKey, presented_key, render_dashboard};
