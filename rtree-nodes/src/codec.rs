//! The payload codec pair used by compact leaves.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Turns a payload into bytes.
pub type Serializer<T> = Arc<dyn Fn(&T) -> anyhow::Result<Vec<u8>> + Send + Sync>;

/// Turns bytes produced by the matching [`Serializer`] back into a payload.
pub type Deserializer<T> = Arc<dyn Fn(&[u8]) -> anyhow::Result<T> + Send + Sync>;

/// A pair of pure functions that move payloads in and out of a compact leaf.
///
/// The pair must satisfy `decode(encode(p)) == p` for every payload stored.
/// That law is not checked here; a pair that breaks it yields wrong payloads
/// on read rather than a failure. Both functions may be called from several
/// threads at once and must not rely on shared mutable state.
///
/// # Examples
///
/// ```rust
/// use rtree_nodes::Codec;
///
/// let codec = Codec::new(
///     |v: &i64| Ok(v.to_string().into_bytes()),
///     |bytes: &[u8]| Ok(std::str::from_utf8(bytes)?.parse::<i64>()?),
/// );
///
/// let bytes = codec.encode(&42).unwrap();
/// assert_eq!(codec.decode(&bytes).unwrap(), 42);
/// ```
pub struct Codec<T> {
    serializer: Serializer<T>,
    deserializer: Deserializer<T>,
}

impl<T> Codec<T> {
    pub fn new<E, D>(serializer: E, deserializer: D) -> Self
    where
        E: Fn(&T) -> anyhow::Result<Vec<u8>> + Send + Sync + 'static,
        D: Fn(&[u8]) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            serializer: Arc::new(serializer),
            deserializer: Arc::new(deserializer),
        }
    }

    /// Builds a codec from already shared function values.
    pub fn from_parts(serializer: Serializer<T>, deserializer: Deserializer<T>) -> Self {
        Self {
            serializer,
            deserializer,
        }
    }

    #[inline]
    pub fn encode(&self, value: &T) -> anyhow::Result<Vec<u8>> {
        (self.serializer)(value)
    }

    #[inline]
    pub fn decode(&self, bytes: &[u8]) -> anyhow::Result<T> {
        (self.deserializer)(bytes)
    }

    pub fn serializer(&self) -> &Serializer<T> {
        &self.serializer
    }

    pub fn deserializer(&self) -> &Deserializer<T> {
        &self.deserializer
    }
}

impl<T> Codec<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// A codec backed by bincode (legacy configuration).
    pub fn bincode() -> Self {
        Self::new(
            |value: &T| {
                bincode::serde::encode_to_vec(value, bincode::config::legacy())
                    .map_err(|e| anyhow::anyhow!("bincode encode failed: {}", e))
            },
            |bytes: &[u8]| {
                bincode::serde::decode_from_slice(bytes, bincode::config::legacy())
                    .map(|(value, _)| value)
                    .map_err(|e| anyhow::anyhow!("bincode decode failed: {}", e))
            },
        )
    }
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        Self {
            serializer: Arc::clone(&self.serializer),
            deserializer: Arc::clone(&self.deserializer),
        }
    }
}

impl<T> fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("payload", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
