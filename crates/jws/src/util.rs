//! Shared helper macros.

/// Declares a closed-ish string-valued enum: a fixed set of named variants
/// that map to literal wire tokens, plus an `Other(String)` catch-all for
/// anything outside that set.
///
/// Unlike a plain closed enum, parsing never fails: an unrecognised token is
/// preserved verbatim in `Other` rather than being rejected at this layer.
/// Rejection of tokens this crate cannot act on happens where it matters —
/// algorithm dispatch — not at the data-model layer, so header values
/// round-trip even when this crate doesn't know what to do with them.
macro_rules! enum_like_str {
    (
        $(#[$enum_attrs:meta])*
        $vis:vis enum $enum_ident:ident {
            $(
                $(#[$variant_attrs:meta])* $variant_ident:ident = $variant_str:literal,
            )*
        }
    ) => {
        $(#[$enum_attrs])*
        #[non_exhaustive]
        $vis enum $enum_ident {
            $(
            $(#[$variant_attrs])*
            $variant_ident,
            )*
            /// A token outside the named set above, preserved as received.
            Other(String),
        }

        impl $enum_ident {
            /// The literal wire token for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant_ident => $variant_str,)*
                    Self::Other(s) => s.as_str(),
                }
            }
        }

        impl core::str::FromStr for $enum_ident {
            type Err = core::convert::Infallible;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Ok(match value {
                    $($variant_str => Self::$variant_ident,)*
                    other => Self::Other(other.to_string()),
                })
            }
        }

        impl core::fmt::Display for $enum_ident {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::ser::Serialize for $enum_ident {
            fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
            where
                S: serde::ser::Serializer,
            {
                ser.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::de::Deserialize<'de> for $enum_ident {
            fn deserialize<D>(de: D) -> Result<Self, D::Error>
            where
                D: serde::de::Deserializer<'de>,
            {
                let s = <std::string::String as serde::de::Deserialize>::deserialize(de)?;
                use core::str::FromStr;
                Ok(Self::from_str(&s).expect("infallible"))
            }
        }
    };
}

pub(crate) use enum_like_str;

#[cfg(test)]
mod tests {
    enum_like_str! {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Animal {
            Cat = "cat",
            Dog = "dog",
        }
    }

    #[test]
    fn closed_variants_round_trip() {
        let json = serde_json::to_string(&Animal::Cat).unwrap();
        assert_eq!(json, "\"cat\"");
        let back: Animal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Animal::Cat);
    }

    #[test]
    fn unknown_token_preserved_not_rejected() {
        let back: Animal = serde_json::from_str("\"giraffe\"").unwrap();
        assert_eq!(back, Animal::Other("giraffe".to_string()));
        assert_eq!(serde_json::to_string(&back).unwrap(), "\"giraffe\"");
    }
}
