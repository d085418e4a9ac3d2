mod stream_choice;

pub use stream_choice::{SeaDriftParameters, SeaParameters, StreamChoice, StreamKind};
