use super::id::IdentityId;

/// The one signed-in identity for this process.
///
/// Only the ID is held; the record itself always comes from the
/// [`IdentityStore`](super::identity::IdentityStore), so the session sees
/// updates such as the has-voted flag immediately.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<IdentityId>,
}

impl Session {
    /// Sign in, replacing whoever was signed in before.
    pub fn begin(&mut self, id: IdentityId) {
        self.current = Some(id);
    }

    /// Sign out, returning who was signed in.
    pub fn end(&mut self) -> Option<IdentityId> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&IdentityId> {
        self.current.as_ref()
    }
}
