/// Identifies one issued request among those for the same piece of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Issues [`RequestToken`]s; issuing a new one invalidates all earlier ones.
///
/// Results are applied only when their token is still current, so a slow
/// response to a superseded request can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.current += 1;
        RequestToken(self.current)
    }

    /// Invalidate every outstanding token without issuing a new request.
    pub fn cancel(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current
    }
}
