//! Wire shape for result envelopes returned by mutating endpoints.
//!
//! Successful mutations respond with the envelope body so clients receive
//! the refreshed element together with any informational messages. Failed
//! envelopes are converted to the shared error schema instead: the status
//! comes from the underlying cause when one was caught, otherwise from the
//! fallback the handler supplies.

use serde::Serialize;

use crate::domain::{Error, Outcome};

/// JSON body for a successful mutation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeBody<T> {
    pub element: T,
    pub messages: Vec<String>,
    pub contains_errors: bool,
}

/// Split an envelope into either a success body or the error to respond
/// with.
///
/// `fallback` builds the error for rejections that carry no cause, such as
/// an unknown identifier or a refused credential.
pub fn unpack<T, U>(
    outcome: Outcome<T>,
    convert: impl FnOnce(T) -> U,
    fallback: impl FnOnce(String) -> Error,
) -> Result<EnvelopeBody<U>, Error> {
    let failed = outcome.failed();
    let cause_code = outcome.cause().map(Error::code);
    let messages = outcome.messages().to_vec();
    let element = outcome.into_element();

    if failed {
        let message = messages
            .into_iter()
            .next()
            .unwrap_or_else(|| "the operation failed".to_owned());
        // The envelope diagnostic is client-safe; the cause only decides
        // the status category.
        return Err(match cause_code {
            Some(code) => Error::new(code, message),
            None => fallback(message),
        });
    }

    let element = element.ok_or_else(|| Error::internal("success envelope without an element"))?;
    Ok(EnvelopeBody {
        element: convert(element),
        messages,
        contains_errors: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn success_keeps_messages_and_clears_the_error_flag() {
        let outcome = Outcome::success_with_message(21, "record removed");
        let body = unpack(outcome, |n| n * 2, Error::not_found).expect("success body");
        assert_eq!(body.element, 42);
        assert_eq!(body.messages, ["record removed"]);
        assert!(!body.contains_errors);
    }

    #[rstest]
    fn rejection_without_cause_uses_the_fallback_code() {
        let outcome: Outcome<i32> = Outcome::failure("no such record");
        let err = unpack(outcome, |n| n, Error::not_found).expect_err("rejection");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "no such record");
    }

    #[rstest]
    fn caught_fault_keeps_its_code_but_not_its_message() {
        let outcome: Outcome<i32> = Outcome::failure_with_cause(
            "the record could not be saved",
            Error::service_unavailable("pool exhausted: 0/16 connections"),
        );
        let err = unpack(outcome, |n| n, Error::not_found).expect_err("fault");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(err.message(), "the record could not be saved");
    }

    #[rstest]
    fn envelope_serialises_with_camel_case_flag() {
        let body = EnvelopeBody {
            element: 1,
            messages: vec![],
            contains_errors: false,
        };
        let json = serde_json::to_value(&body).expect("serialise");
        assert_eq!(json["containsErrors"], false);
    }
}
