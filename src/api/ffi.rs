//! C-compatible API exposed to the hosting web layer.
//!
//! Every call answers with a JSON string the caller must release with
//! [`survival_free_str`]. Failures are encoded in the payload
//! (`{"ok":false,"code":N,"error":"..."}`); nothing panics across the boundary.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use serde::Serialize;

use crate::common::config::AppCfg;
use crate::common::error::{SurvivalError, SurvivalResult};
use crate::features::PassengerInput;
use crate::form::{self, FormErrors, FormOutcome};
use crate::inference::{service as inference_service, Example, PredictionResult, ReloadingPredictor};
use crate::training::FsArtifactRepo;

/// ABI version to coordinate with the web layer.
#[no_mangle]
pub extern "C" fn survival_api_version() -> u32 {
    1
}

#[derive(Serialize)]
struct Envelope<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a PredictionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a FormErrors>,
}

impl<'a> Envelope<'a> {
    fn success(result: &'a PredictionResult) -> Self {
        Self {
            ok: true,
            result: Some(result),
            code: None,
            error: None,
            errors: None,
        }
    }

    fn failure(err: &SurvivalError) -> Self {
        Self {
            ok: false,
            result: None,
            code: Some(err.code() as u32),
            error: Some(err.user_message()),
            errors: None,
        }
    }

    fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| FALLBACK_JSON.to_string())
    }
}

fn envelope(outcome: &SurvivalResult<PredictionResult>) -> String {
    match outcome {
        Ok(result) => Envelope::success(result).render(),
        Err(err) => Envelope::failure(err).render(),
    }
}

/// Invalid forms answer `InvalidInput` with the per-field messages attached.
fn form_envelope(outcome: &FormOutcome) -> String {
    match outcome {
        FormOutcome::Predicted(result) => Envelope::success(result).render(),
        FormOutcome::Invalid { errors, .. } => {
            let err = SurvivalError::InvalidInput(errors.to_string());
            Envelope {
                errors: Some(errors),
                ..Envelope::failure(&err)
            }
            .render()
        }
        FormOutcome::Failed { error, .. } => Envelope::failure(error).render(),
    }
}

const FALLBACK_JSON: &str = "{\"ok\":false}";

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn read_str(ptr: *const c_char, field: &str) -> SurvivalResult<String> {
    if ptr.is_null() {
        return Err(SurvivalError::prediction_failed(format!("{field} is null")));
    }
    Ok(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

/// # Safety
/// Same contract as [`survival_predict`].
unsafe fn read_input(
    pclass: *const c_char,
    sex: *const c_char,
    age: *const c_char,
    embarked: *const c_char,
) -> SurvivalResult<PassengerInput> {
    Ok(PassengerInput::new(
        read_str(pclass, "pclass")?,
        read_str(sex, "sex")?,
        read_str(age, "age")?,
        read_str(embarked, "embarked")?,
    ))
}

fn engine() -> ReloadingPredictor<FsArtifactRepo> {
    ReloadingPredictor::new(FsArtifactRepo::from_cfg(&AppCfg::load()))
}

/// Validate raw form fields and predict survival. Returns a JSON envelope;
/// rejected fields come back under `errors`.
///
/// # Safety
/// Each pointer must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn survival_predict(
    pclass: *const c_char,
    sex: *const c_char,
    age: *const c_char,
    embarked: *const c_char,
) -> *const c_char {
    let body = match read_input(pclass, sex, age, embarked) {
        Ok(input) => form_envelope(&form::submit(&engine(), &input)),
        Err(err) => envelope(&Err(err)),
    };
    string_to_raw(body)
}

/// Run a canned preset: 0 survives, 1 does not survive.
#[no_mangle]
pub extern "C" fn survival_example(which: u32) -> *const c_char {
    let outcome = Example::from_index(which)
        .ok_or_else(|| SurvivalError::InvalidInput(format!("unknown example {which}")))
        .and_then(|example| inference_service::run_example(&engine(), example));
    string_to_raw(envelope(&outcome))
}

/// Free strings allocated by Rust.
///
/// # Safety
/// `ptr` must be null or a pointer previously returned by this module and not
/// yet freed.
#[no_mangle]
pub unsafe extern "C" fn survival_free_str(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(CString::from_raw(ptr as *mut c_char));
}

fn string_to_raw(s: String) -> *const c_char {
    match CString::new(s) {
        Ok(cstring) => cstring.into_raw(),
        // serde_json escapes control characters, so an interior NUL cannot occur.
        Err(_) => CString::new(FALLBACK_JSON)
            .map(CString::into_raw)
            .unwrap_or(std::ptr::null_mut()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_carries_code_and_user_message() {
        let json = envelope(&Err(SurvivalError::model_unavailable("missing")));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["code"], 1);
        assert_eq!(value["error"], "Model unavailable");
        assert!(value.get("result").is_none());
    }

    #[test]
    fn invalid_form_envelope_lists_field_errors() {
        let mut errors = FormErrors::default();
        errors.push("age", "Age must be between 0 and 100 years.");
        let outcome = FormOutcome::Invalid {
            input: PassengerInput::new("1", "female", "150", "C"),
            errors,
        };
        let value: serde_json::Value = serde_json::from_str(&form_envelope(&outcome)).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["code"], 3);
        assert_eq!(value["error"], "Please correct the errors");
        assert_eq!(value["errors"][0]["field"], "age");
        assert!(value.get("result").is_none());
    }

    #[test]
    fn null_pointers_are_reported_not_dereferenced() {
        let ptr = unsafe {
            survival_predict(
                std::ptr::null(),
                std::ptr::null(),
                std::ptr::null(),
                std::ptr::null(),
            )
        };
        let json = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_owned();
        unsafe { survival_free_str(ptr) };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["code"], 2);
    }

    #[test]
    fn unknown_example_is_invalid_input() {
        let ptr = survival_example(7);
        let json = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_owned();
        unsafe { survival_free_str(ptr) };
        assert!(json.contains("\"code\":3"), "{json}");
    }
}
