use crate::{foundation::error::QuadResult, render::request::DrawRequest};

/// Receives the draw requests built by features.
///
/// Requests are handed over by value: the dispatcher owns them from then on.
pub trait DrawDispatch {
    /// Draw (or redraw) the feature named by `request.feature_id`.
    fn draw_features(&mut self, request: DrawRequest) -> QuadResult<()>;

    /// Forget everything drawn for `feature_id`.
    fn remove_feature(&mut self, feature_id: &str) -> QuadResult<()> {
        let _ = feature_id;
        Ok(())
    }
}

/// Dispatcher that keeps every request, for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingDispatch {
    pub(crate) requests: Vec<DrawRequest>,
    pub(crate) removed: Vec<String>,
}

impl RecordingDispatch {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests in the order they were dispatched.
    pub fn requests(&self) -> &[DrawRequest] {
        &self.requests
    }

    /// Most recent request, if any.
    pub fn last(&self) -> Option<&DrawRequest> {
        self.requests.last()
    }

    /// Feature ids passed to `remove_feature`, in call order.
    pub fn removed(&self) -> &[String] {
        &self.removed
    }
}

impl DrawDispatch for RecordingDispatch {
    fn draw_features(&mut self, request: DrawRequest) -> QuadResult<()> {
        self.requests.push(request);
        Ok(())
    }

    fn remove_feature(&mut self, feature_id: &str) -> QuadResult<()> {
        self.removed.push(feature_id.to_owned());
        Ok(())
    }
}
