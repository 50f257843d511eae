// implemented by components holding channel subscriptions; the Rc cycles they
// create are not auto-collected, so the owner must break the chain explicitly
pub trait Destroyable {
    fn destroy(&mut self);
}
