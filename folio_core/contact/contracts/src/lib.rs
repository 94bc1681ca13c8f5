use std::future::Future;

use folio_models::contact::{ContactInfo, ContactRequest, SubmissionResult};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Deliver a contact request via the configured provider.
    ///
    /// The request is not validated again and the provider is called exactly
    /// once. Provider errors are never propagated but turned into
    /// [`SubmissionResult::Failure`].
    fn submit(&self, request: ContactRequest) -> impl Future<Output = SubmissionResult> + Send;

    /// Return the public contact information.
    fn get_info(&self) -> ContactInfo;
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(mut self, request: ContactRequest, result: SubmissionResult) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get_info(mut self, info: ContactInfo) -> Self {
        self.expect_get_info().once().return_once(move || info);
        self
    }
}
