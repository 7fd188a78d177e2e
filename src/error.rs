#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum ProviderErrorCode {
    #[error("The user rejected the request.")]
    UserRejectedRequest,
    #[error("The requested method and/or account has not been authorized by the user.")]
    Unauthorized,
    #[error("The provider does not support the requested method.")]
    UnsupportedMethod,
    #[error("The provider is disconnected from all chains.")]
    Disconnected,
    #[error("The provider is not connected to the requested chain.")]
    ChainDisconnected,
    /// Also used when the provider returned something we could not decode.
    #[error("An error occured inside the wallet provider.")]
    InternalError,
    #[error("Unknown error code `{0}'")]
    Unknown(i64),
}

/// Error returned by a failed provider `request` call, as specified by
/// [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193#errors).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error, serde::Deserialize)]
#[error("{code}. {message}")]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    #[serde(default)]
    pub message: String,
}

/// Outcome of a failed connection attempt.
///
/// The [`Display`] message of each variant is written to be shown to the
/// user as-is.
///
/// [`Display`]: std::fmt::Display
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// No wallet application was discovered in this browser session. This is
    /// a steady state of the page, not a provider failure.
    #[error("No Ethereum wallet was detected. Please consider installing one.")]
    NotInstalled,
    /// The user explicitly declined the authorization prompt. An expected
    /// outcome, nothing is retried automatically.
    #[error("The connection request was rejected. Try again if you changed your mind.")]
    Rejected,
    /// Any other failure reported by the wallet application.
    #[error("An unexpected wallet error occured. Please check your wallet and try again. ({0})")]
    Unexpected(ProviderError),
}

impl From<ProviderError> for ConnectError {
    fn from(error: ProviderError) -> Self {
        if error.code == ProviderErrorCode::UserRejectedRequest {
            ConnectError::Rejected
        } else {
            ConnectError::Unexpected(error)
        }
    }
}

impl<'de> serde::Deserialize<'de> for ProviderErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;
        impl serde::de::Visitor<'_> for Visitor {
            type Value = ProviderErrorCode;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "Expecting an integer ProviderErrorCode")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                match v {
                    4001 => Ok(ProviderErrorCode::UserRejectedRequest),
                    4100 => Ok(ProviderErrorCode::Unauthorized),
                    4200 => Ok(ProviderErrorCode::UnsupportedMethod),
                    4900 => Ok(ProviderErrorCode::Disconnected),
                    4901 => Ok(ProviderErrorCode::ChainDisconnected),
                    -32603 => Ok(ProviderErrorCode::InternalError),
                    unknown => Ok(ProviderErrorCode::Unknown(unknown)),
                }
            }

            // EIP-1193 codes are positive so decoders may hand them to us as
            // unsigned or, through the JS boundary, as floating point.
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                match i64::try_from(v) {
                    Ok(v) => self.visit_i64(v),
                    Err(_) => Err(E::custom(format!("error code out of range: {v}"))),
                }
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&v) {
                    self.visit_i64(v as i64)
                } else {
                    Err(E::custom(format!("error code is not an integer: {v}")))
                }
            }
        }

        deserializer.deserialize_i64(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn provider_error_code_json() {
        assert_eq!(
            serde_json::from_value::<ProviderErrorCode>(json! { 4001 }).unwrap(),
            ProviderErrorCode::UserRejectedRequest
        );
        assert_eq!(
            serde_json::from_value::<ProviderErrorCode>(json! { 4100 }).unwrap(),
            ProviderErrorCode::Unauthorized
        );
        assert_eq!(
            serde_json::from_value::<ProviderErrorCode>(json! { 4200 }).unwrap(),
            ProviderErrorCode::UnsupportedMethod
        );
        assert_eq!(
            serde_json::from_value::<ProviderErrorCode>(json! { 4900 }).unwrap(),
            ProviderErrorCode::Disconnected
        );
        assert_eq!(
            serde_json::from_value::<ProviderErrorCode>(json! { 4901 }).unwrap(),
            ProviderErrorCode::ChainDisconnected
        );
        assert_eq!(
            serde_json::from_value::<ProviderErrorCode>(json! { -32603 }).unwrap(),
            ProviderErrorCode::InternalError
        );
        assert_eq!(
            serde_json::from_value::<ProviderErrorCode>(json! { -42 }).unwrap(),
            ProviderErrorCode::Unknown(-42)
        );
    }

    #[test]
    fn provider_error_json() {
        assert_eq!(
            serde_json::from_value::<ProviderError>(json! { {
                "code": 4001,
                "message": "User rejected the request.",
            }})
            .unwrap(),
            ProviderError {
                code: ProviderErrorCode::UserRejectedRequest,
                message: "User rejected the request.".to_owned()
            }
        );

        assert_eq!(
            serde_json::from_value::<ProviderError>(json! { {
                "code": -32603,
                "message": "Internal JSON-RPC error.",
            }})
            .unwrap(),
            ProviderError {
                code: ProviderErrorCode::InternalError,
                message: "Internal JSON-RPC error.".to_owned()
            }
        );
    }

    #[test]
    fn provider_error_json_without_message() {
        assert_eq!(
            serde_json::from_value::<ProviderError>(json! { {
                "code": 4900,
            }})
            .unwrap(),
            ProviderError {
                code: ProviderErrorCode::Disconnected,
                message: String::new()
            }
        );
    }

    #[test]
    fn provider_error_json_extra_fields() {
        // MetaMask attaches `data` and `stack` to some errors, they must not
        // break decoding.
        assert_eq!(
            serde_json::from_value::<ProviderError>(json! { {
                "code": 4001,
                "message": "User rejected the request.",
                "data": { "cause": null },
                "stack": "Error: User rejected the request.",
            }})
            .unwrap()
            .code,
            ProviderErrorCode::UserRejectedRequest
        );
    }

    #[test]
    fn rejection_is_classified_apart() {
        let rejected = ProviderError {
            code: ProviderErrorCode::UserRejectedRequest,
            message: "User rejected the request.".to_owned(),
        };
        assert_eq!(ConnectError::from(rejected), ConnectError::Rejected);

        let internal = ProviderError {
            code: ProviderErrorCode::InternalError,
            message: "Internal JSON-RPC error.".to_owned(),
        };
        assert_eq!(
            ConnectError::from(internal.clone()),
            ConnectError::Unexpected(internal)
        );

        let unknown = ProviderError {
            code: ProviderErrorCode::Unknown(1013),
            message: String::new(),
        };
        assert!(matches!(
            ConnectError::from(unknown),
            ConnectError::Unexpected(_)
        ));
    }

    #[test]
    fn rejected_and_unexpected_messages_differ() {
        let rejected = ConnectError::from(ProviderError {
            code: ProviderErrorCode::UserRejectedRequest,
            message: String::new(),
        });
        let unexpected = ConnectError::from(ProviderError {
            code: ProviderErrorCode::InternalError,
            message: String::new(),
        });
        assert_ne!(rejected.to_string(), unexpected.to_string());
    }
}
