/// Observer told once that the channel's connection has closed.
pub trait CloseCallback: Send {
    fn channel_closed(self: Box<Self>);
}

impl<F> CloseCallback for F
where
    F: FnOnce() + Send,
{
    fn channel_closed(self: Box<Self>) {
        (*self)()
    }
}
