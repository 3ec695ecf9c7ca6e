/// A counter object used to implement auto-increment identifiers of the form
/// `<prefix><n>`. Values are handed out at most once, so an identifier is never
/// reused for the lifetime of the store that owns the counter.
#[derive(Debug, Clone)]
pub struct Counter {
    prefix: &'static str,
    next: u64,
}

impl Counter {
    /// Create a new `Counter` with the given prefix, starting at the given value.
    pub fn new(prefix: &'static str, start: u64) -> Self {
        Self {
            prefix,
            next: start,
        }
    }

    /// Retrieve the next identifier and advance the counter.
    pub fn next<T: From<String>>(&mut self) -> T {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id.into()
    }

    /// Make sure the counter will never produce `id`, which was assigned
    /// externally (e.g. a fixed seed record). IDs that do not have this
    /// counter's `<prefix><n>` shape can never collide and are ignored.
    pub fn skip_past(&mut self, id: &str) {
        let taken = id
            .strip_prefix(self.prefix)
            .and_then(|suffix| suffix.parse::<u64>().ok());
        if let Some(taken) = taken {
            self.next = self.next.max(taken + 1);
        }
    }
}
