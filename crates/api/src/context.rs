use leafy_auth::Actor;

/// The resolved actor for a request.
///
/// Present on every request: routes that tolerate guests read it as-is,
/// strict routes reject `Actor::Guest`.
#[derive(Debug, Clone)]
pub struct ActorContext(Actor);

impl ActorContext {
    pub fn new(actor: Actor) -> Self {
        Self(actor)
    }

    pub fn actor(&self) -> &Actor {
        &self.0
    }
}
