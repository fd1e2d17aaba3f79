pub use self::glob::GlobPattern;
pub use self::time::DurationMillis;

pub mod glob {
    use std::ops::Deref;

    use ::glob::PatternError;
    use ::serde::{de, Deserialize, Serialize};

    /// A glob pattern that (de)serializes as its source string.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GlobPattern(::glob::Pattern);

    impl GlobPattern {
        pub fn parse(pattern: &str) -> Result<Self, PatternError> {
            ::glob::Pattern::new(pattern).map(Self)
        }
    }

    impl Deref for GlobPattern {
        type Target = ::glob::Pattern;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl Serialize for GlobPattern {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.0.as_str())
        }
    }

    impl<'de> Deserialize<'de> for GlobPattern {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Self::parse(&s).map_err(de::Error::custom)
        }
    }

}

pub mod time {
    use std::{ops::Deref, time::Duration};

    use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// A duration that (de)serializes as an integer number of milliseconds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct DurationMillis(Duration);

    impl DurationMillis {
        pub fn from_millis(ms: u64) -> Self {
            Self(Duration::from_millis(ms))
        }
    }

    impl Deref for DurationMillis {
        type Target = Duration;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl From<DurationMillis> for Duration {
        fn from(value: DurationMillis) -> Self {
            value.0
        }
    }

    impl Serialize for DurationMillis {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_u64(self.0.as_millis() as u64)
        }
    }

    impl<'de> Deserialize<'de> for DurationMillis {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            u64::deserialize(deserializer).map(Self::from_millis)
        }
    }

}
