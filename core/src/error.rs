// Scorum Client
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use parity_scale_codec::Error as CodecError;

/// Errors returned when building, encoding, signing or verifying Scorum data.
///
/// All of them are contract violations by the caller and are never retried.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A name that is not part of an ordinal table, such as a market, a wincase, a sport or an
    /// operation.
    #[error("no such {table} variant `{name}`")]
    UnknownVariant { table: &'static str, name: String },

    /// The asset symbol has no entry in the precision table.
    #[error("unknown asset `{0}`")]
    UnknownAsset(String),

    /// A field required to build a record was not provided.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A chain id is required to derive a signing digest.
    #[error("a chain id must be provided")]
    MissingChainId,

    /// Signing was requested without any private key.
    #[error("at least one private key is required to sign")]
    EmptyKeySet,

    /// A required public key has no matching signature.
    #[error("signature for {key} missing (compressed key {compressed})")]
    VerificationFailed { key: String, compressed: String },

    /// Input that cannot be parsed or decoded.
    #[error("malformed {what}: {reason}")]
    MalformedInput { what: &'static str, reason: String },
}

impl Error {
    pub fn malformed(what: &'static str, reason: impl ToString) -> Self {
        Error::MalformedInput {
            what,
            reason: reason.to_string(),
        }
    }
}

impl From<CodecError> for Error {
    fn from(error: CodecError) -> Self {
        Error::malformed("wire data", error)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_variant_names_the_offender() {
        let error = Error::UnknownVariant {
            table: "market",
            name: "corner".into(),
        };
        assert_eq!(error.to_string(), "no such market variant `corner`");
    }

    #[test]
    fn codec_errors_are_malformed_input() {
        let error = Error::from(CodecError::from("Not enough data to fill buffer"));
        match error {
            Error::MalformedInput { what, .. } => assert_eq!(what, "wire data"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
