//! Request/response pairing: a payload wrapper that carries a `request_id`.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::error::ErrorCode;
use crate::message::traits::Message;
use crate::util::{Address, RequestId};

/// Wraps a request payload with the `request_id` its response must echo
/// back, and the `origin` address the reply must be sent to (spec ยง3
/// "Request/response pairing"). An envelope carries no source address of
/// its own, so `origin` is the only way a handler learns where to send the
/// eventual [`Response`].
///
/// # Examples
///
/// ```rust
/// use nodal_rt::message::{Message, Request};
/// use nodal_rt::util::{Address, LocalityId, RequestId};
///
/// #[derive(Debug, Clone)]
/// struct Ping;
/// impl Message for Ping { const MESSAGE_TYPE: &'static str = "ping"; }
///
/// let request_id = RequestId::new();
/// let origin = Address::new(LocalityId::new());
/// let req = Request::new(request_id, origin, Ping);
/// assert_eq!(req.request_id(), request_id);
/// assert_eq!(req.origin(), origin);
/// ```
#[derive(Debug, Clone)]
pub struct Request<M: Message> {
    request_id: RequestId,
    origin: Address,
    payload: M,
}

impl<M: Message> Message for Request<M> {
    const MESSAGE_TYPE: &'static str = M::MESSAGE_TYPE;
}

impl<M: Message> Request<M> {
    /// Wrap `payload`, tagging it with `request_id` and the replying
    /// address `origin`.
    pub fn new(request_id: RequestId, origin: Address, payload: M) -> Self {
        Self { request_id, origin, payload }
    }

    /// The id the eventual response must echo.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// The address the eventual response must be sent to.
    pub fn origin(&self) -> Address {
        self.origin
    }

    /// Borrow the wrapped payload.
    pub fn payload(&self) -> &M {
        &self.payload
    }

    /// Take ownership of the wrapped payload.
    pub fn into_payload(self) -> M {
        self.payload
    }
}

/// A response envelope payload: the originating address, the `request_id`
/// it answers, and either a success payload or an [`ErrorCode`].
#[derive(Debug, Clone)]
pub struct Response<M: Message> {
    request_id: RequestId,
    origin: Address,
    outcome: Result<M, ErrorCode>,
}

impl<M: Message> Message for Response<M> {
    const MESSAGE_TYPE: &'static str = M::MESSAGE_TYPE;
}

impl<M: Message> Response<M> {
    /// Build a successful response.
    pub fn success(request_id: RequestId, origin: Address, payload: M) -> Self {
        Self {
            request_id,
            origin,
            outcome: Ok(payload),
        }
    }

    /// Build a failed response carrying `code`.
    pub fn failure(request_id: RequestId, origin: Address, code: ErrorCode) -> Self {
        Self {
            request_id,
            origin,
            outcome: Err(code),
        }
    }

    /// The request id this response answers.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// The address that sent the original request.
    pub fn origin(&self) -> Address {
        self.origin
    }

    /// Borrow the outcome: `Ok(payload)` or `Err(code)`.
    pub fn outcome(&self) -> Result<&M, ErrorCode> {
        self.outcome.as_ref().map_err(|e| *e)
    }
}

impl<M: Message> fmt::Display for Response<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(_) => write!(f, "response[{}] success", self.request_id),
            Err(code) => write!(f, "response[{}] error: {code}", self.request_id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::util::LocalityId;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Pong(u32);
    impl Message for Pong {
        const MESSAGE_TYPE: &'static str = "pong";
    }

    #[test]
    fn request_carries_its_id_origin_and_payload() {
        let request_id = RequestId::new();
        let origin = Address::new(LocalityId::new());
        let req = Request::new(request_id, origin, Pong(1));
        assert_eq!(req.request_id(), request_id);
        assert_eq!(req.origin(), origin);
        assert_eq!(req.payload(), &Pong(1));
    }

    #[test]
    fn response_success_and_failure() {
        let request_id = RequestId::new();
        let origin = Address::new(LocalityId::new());

        let ok = Response::success(request_id, origin, Pong(2));
        assert_eq!(ok.outcome().unwrap(), &Pong(2));

        let err = Response::<Pong>::failure(request_id, origin, ErrorCode::RequestTimeout);
        assert_eq!(err.outcome().unwrap_err(), ErrorCode::RequestTimeout);
    }
}
