/// Options applied while constructing a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Name of the `Data` member holding the payload. Each trigger kind
    /// falls back to its default binding name when unset.
    pub name: Option<String>,
}

/// A function that sets [`TriggerOptions`].
pub type TriggerOption = Box<dyn FnOnce(&mut TriggerOptions) + Send>;

impl TriggerOptions {
    /// Starts from defaults and applies `options` in order.
    pub fn new(options: impl IntoIterator<Item = TriggerOption>) -> Self {
        let mut opts = TriggerOptions::default();
        for option in options {
            option(&mut opts);
        }
        opts
    }

    pub(crate) fn key_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }
}

/// Sets the name of the trigger binding, i.e. the `Data` member to decode.
pub fn with_name(name: impl Into<String>) -> TriggerOption {
    let name = name.into();
    Box::new(move |o: &mut TriggerOptions| o.name = Some(name))
}
