use super::snapshot::InputSnapshot;

/// Capability the render loop depends on to obtain per-frame input.
///
/// Implementations must reset their accumulated deltas on every call; the
/// render loop polls exactly once per frame.
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    fn poll(&mut self) -> InputSnapshot {
        (**self).poll()
    }
}

impl<S: InputSource + ?Sized> InputSource for Box<S> {
    fn poll(&mut self) -> InputSnapshot {
        (**self).poll()
    }
}
