/// Rejection returned when an authenticated principal is not the owner of
/// the resource it is trying to mutate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("access denied: principals may only act on resources they own")]
pub struct Forbidden;

/// Ownership guard. Allowed iff the authenticated identity equals the
/// resource owner's canonical email. Product and image callers resolve the
/// owning account's email first and authorize against that, never against an
/// intermediate id.
pub fn authorize(principal_email: &str, owner_email: &str) -> Result<(), Forbidden> {
    if principal_email == owner_email {
        Ok(())
    } else {
        Err(Forbidden)
    }
}
