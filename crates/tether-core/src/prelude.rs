pub use crate::effects::{Dispose, on_cleanup};
pub use crate::effects_ext::disposable_effect;
pub use crate::runtime::{Composer, Instance, InstanceId, in_render, on_dispose, remember};
pub use crate::scope::Scope;
pub use crate::state::{LocalState, remember_local};
