use std::borrow::Cow;

#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub name: Cow<'static, str>,
    pub value: f64,
}

impl Measurement {
    pub fn new(name: &'static str, value: f64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }
}
