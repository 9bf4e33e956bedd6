use std::fmt;
use std::error::Error;

/// GGUF metadata value types that can be stored in a GGUF file
#[derive(Clone, PartialEq)]
pub enum GGUFValue {
    /// String value type for text data
    String(String),
    /// Integer value type for whole numbers, stored as i64
    Int(i64),
    /// Float value type for decimal numbers, stored as f64
    Float(f64),
    /// Boolean value type for true/false values
    Bool(bool),
    /// Array value type for sequences of other GGUF values
    Array(Vec<GGUFValue>),
}

impl GGUFValue {
    /// Attempts to convert the value to an integer
    ///
    /// # Returns
    /// Some(i64) if the value can be converted to an integer, None otherwise
    pub fn as_int(&self) -> Option<i64> {
        match self {
            GGUFValue::Int(i) => Some(*i),
            GGUFValue::Float(f) => Some(*f as i64),
            GGUFValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GGUFValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value, listing at most `limit` array elements followed by the total.
    pub fn display_truncated(&self, limit: usize) -> String {
        match self {
            GGUFValue::Array(arr) if arr.len() > limit => format!(
                "[{}, ... out of {}]",
                arr[..limit].iter().map(|v| v.display_truncated(limit)).collect::<Vec<_>>().join(", "),
                arr.len()
            ),
            GGUFValue::Array(arr) => format!(
                "[{}]",
                arr.iter().map(|v| v.display_truncated(limit)).collect::<Vec<_>>().join(", ")
            ),
            GGUFValue::String(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }
}

impl fmt::Debug for GGUFValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GGUFValue::String(s) => write!(f, "String({:?})", s),
            GGUFValue::Int(i) => write!(f, "Int({})", i),
            GGUFValue::Float(fl) => write!(f, "Float({})", fl),
            GGUFValue::Bool(b) => write!(f, "Bool({})", b),
            GGUFValue::Array(arr) => {
                if arr.len() <= 3 {
                    write!(f, "Array({:?})", arr)
                } else {
                    write!(f, "Array([{:?}, {:?}, {:?}, ...and {} more])",
                           &arr[0], &arr[1], &arr[2], arr.len() - 3)
                }
            }
        }
    }
}

impl fmt::Display for GGUFValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GGUFValue::String(s) => write!(f, "{}", s),
            GGUFValue::Int(i) => write!(f, "{}", i),
            GGUFValue::Float(fl) => write!(f, "{}", fl),
            GGUFValue::Bool(b) => write!(f, "{}", b),
            GGUFValue::Array(arr) => {
                write!(f, "[")?;
                for (i, value) in arr.iter().enumerate() {
                    if i > 0 { write!(f, ", ")? }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Custom error types for GGUF operations
#[derive(Debug)]
pub enum GGUFError {
    /// Wraps std::io::Error for file operations
    IoError(std::io::Error),
    /// Invalid format errors with a message
    InvalidFormat(String),
    /// Missing metadata key errors
    MetadataNotFound(String),
}

impl fmt::Display for GGUFError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GGUFError::IoError(e) => write!(f, "I/O error: {}", e),
            GGUFError::InvalidFormat(msg) => write!(f, "Invalid GGUF format: {}", msg),
            GGUFError::MetadataNotFound(key) => write!(f, "Metadata key not found: {}", key),
        }
    }
}

impl Error for GGUFError {}

impl From<std::io::Error> for GGUFError {
    fn from(err: std::io::Error) -> Self {
        GGUFError::IoError(err)
    }
}

/// Metadata value type identifiers from the GGUF format specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GGUFValueType {
    UINT8 = 0,
    INT8 = 1,
    UINT16 = 2,
    INT16 = 3,
    UINT32 = 4,
    INT32 = 5,
    FLOAT32 = 6,
    BOOL = 7,
    STRING = 8,
    ARRAY = 9,
    UINT64 = 10,
    INT64 = 11,
    FLOAT64 = 12,
}

impl GGUFValueType {
    /// Convert the value type to a string representation
    pub fn type_string(&self) -> &'static str {
        match self {
            GGUFValueType::UINT8 => "u8",
            GGUFValueType::INT8 => "i8",
            GGUFValueType::UINT16 => "u16",
            GGUFValueType::INT16 => "i16",
            GGUFValueType::UINT32 => "u32",
            GGUFValueType::INT32 => "i32",
            GGUFValueType::FLOAT32 => "f32",
            GGUFValueType::BOOL => "bool",
            GGUFValueType::STRING => "str",
            GGUFValueType::ARRAY => "arr",
            GGUFValueType::UINT64 => "u64",
            GGUFValueType::INT64 => "i64",
            GGUFValueType::FLOAT64 => "f64",
        }
    }
}

impl TryFrom<u32> for GGUFValueType {
    type Error = GGUFError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => GGUFValueType::UINT8,
            1 => GGUFValueType::INT8,
            2 => GGUFValueType::UINT16,
            3 => GGUFValueType::INT16,
            4 => GGUFValueType::UINT32,
            5 => GGUFValueType::INT32,
            6 => GGUFValueType::FLOAT32,
            7 => GGUFValueType::BOOL,
            8 => GGUFValueType::STRING,
            9 => GGUFValueType::ARRAY,
            10 => GGUFValueType::UINT64,
            11 => GGUFValueType::INT64,
            12 => GGUFValueType::FLOAT64,
            _ => return Err(GGUFError::InvalidFormat(format!("Unknown value type: {}", value))),
        })
    }
}

impl fmt::Display for GGUFValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_string())
    }
}

/// Storage type of a tensor, as numbered by ggml
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorType {
    F32,
    F16,
    Q4_0,
    Q4_1,
    Q5_0,
    Q5_1,
    Q8_0,
    Q8_1,
    Q2_K,
    Q3_K,
    Q4_K,
    Q5_K,
    Q6_K,
    Q8_K,
    I8,
    I16,
    I32,
    I64,
    F64,
    BF16,
    Other(u32),
}

impl From<u32> for TensorType {
    fn from(value: u32) -> Self {
        match value {
            0 => TensorType::F32,
            1 => TensorType::F16,
            2 => TensorType::Q4_0,
            3 => TensorType::Q4_1,
            6 => TensorType::Q5_0,
            7 => TensorType::Q5_1,
            8 => TensorType::Q8_0,
            9 => TensorType::Q8_1,
            10 => TensorType::Q2_K,
            11 => TensorType::Q3_K,
            12 => TensorType::Q4_K,
            13 => TensorType::Q5_K,
            14 => TensorType::Q6_K,
            15 => TensorType::Q8_K,
            24 => TensorType::I8,
            25 => TensorType::I16,
            26 => TensorType::I32,
            27 => TensorType::I64,
            28 => TensorType::F64,
            30 => TensorType::BF16,
            other => TensorType::Other(other),
        }
    }
}

impl fmt::Display for TensorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TensorType::Other(id) => write!(f, "TYPE_{}", id),
            named => write!(f, "{:?}", named),
        }
    }
}

/// Information about a tensor in the GGUF file
#[derive(Debug, Clone)]
pub struct TensorInfo {
    /// Name/label of the tensor
    pub name: String,
    /// Size of each dimension
    pub dims: Vec<u64>,
    /// Storage type of the tensor
    pub data_type: TensorType,
    /// Offset in the file where tensor data begins
    pub offset: u64,
}

impl fmt::Display for TensorInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}] {}", self.name, self.dims.iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" x "), self.data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_type_names() {
        assert_eq!(TensorType::from(0).to_string(), "F32");
        assert_eq!(TensorType::from(12).to_string(), "Q4_K");
        assert_eq!(TensorType::from(99).to_string(), "TYPE_99");
    }

    #[test]
    fn test_value_type_rejects_unknown_id() {
        assert!(GGUFValueType::try_from(12).is_ok());
        assert!(GGUFValueType::try_from(13).is_err());
    }

    #[test]
    fn test_display_truncated() {
        let arr = GGUFValue::Array((0..5).map(GGUFValue::Int).collect());
        assert_eq!(arr.display_truncated(2), "[0, 1, ... out of 5]");
        assert_eq!(arr.display_truncated(8), "[0, 1, 2, 3, 4]");
        assert_eq!(GGUFValue::String("gpt".into()).display_truncated(2), "\"gpt\"");
    }

    #[test]
    fn test_tensor_display() {
        let tensor = TensorInfo {
            name: "token_embd.weight".to_string(),
            dims: vec![4096, 32000],
            data_type: TensorType::Q4_K,
            offset: 0,
        };
        assert_eq!(tensor.to_string(), "token_embd.weight [4096 x 32000] Q4_K");
    }
}
