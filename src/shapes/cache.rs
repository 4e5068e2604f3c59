use tracing::trace;

use crate::profile::Profile;

/// Holds the last generated profile until a parameter changes.
///
/// The cache is empty ("stale") until first filled and again after
/// [`invalidate`](Self::invalidate). A stored override is returned verbatim
/// until the next invalidation.
#[derive(Debug, Clone, Default)]
pub struct ProfileCache {
    profile: Option<Profile>,
}

impl ProfileCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached profile, if any.
    #[must_use]
    pub fn get(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Returns `true` if the next read has to regenerate.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.profile.is_none()
    }

    /// Drops the cached profile.
    pub fn invalidate(&mut self) {
        if self.profile.take().is_some() {
            trace!("profile cache invalidated");
        }
    }

    /// Stores `profile` as is, replacing whatever was cached.
    pub fn store(&mut self, profile: Profile) -> &Profile {
        self.profile.insert(profile)
    }

    /// Returns the cached profile, generating it with `generate` when stale.
    ///
    /// # Errors
    ///
    /// Returns the error of `generate`; the cache then stays stale.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        generate: impl FnOnce() -> Result<Profile, E>,
    ) -> Result<&Profile, E> {
        let profile = match self.profile.take() {
            Some(profile) => {
                trace!("profile cache hit");
                profile
            }
            None => generate()?,
        };
        Ok(self.profile.insert(profile))
    }
}
