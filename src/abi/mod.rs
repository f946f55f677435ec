//! # ABI Encoding and Decoding
//!
//! Binds contract call encoding to an ABI descriptor.
//!
//! ## Available Components
//!
//! - [`AbiCodec`]: encodes function calls into call-data and decodes
//!   returned bytes into typed values
//! - [`ContractHandle`]: binds a codec to a deployed contract address
//! - [`ContractArtifact`]: on-disk ABI + bytecode artifact
//!
//! Encoding and decoding are exact inverses for every supported type:
//! fixed-width integers, addresses, strings, fixed and dynamic byte
//! arrays, and enums represented as `uint8`.

pub mod artifact;

pub use artifact::ContractArtifact;

use ethers::abi::{Abi, Function, Token};
use ethers::types::{Address, Bytes};

use crate::error::{ChainError, ChainResult};

/// Encoder/decoder for contract function calls.
///
/// Wraps a parsed ABI descriptor. Functions are resolved by exact
/// name and arity; argument tokens are shape-checked against the
/// declared parameter types before encoding, so a mismatch never
/// reaches the network.
#[derive(Debug, Clone)]
pub struct AbiCodec {
    abi: Abi,
}

impl AbiCodec {
    /// Creates a codec over a parsed ABI descriptor.
    #[must_use]
    pub const fn new(abi: Abi) -> Self {
        Self { abi }
    }

    /// Parses a codec from an ABI JSON array.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Artifact` if the JSON is not a valid ABI
    /// descriptor.
    pub fn from_json(json: &str) -> ChainResult<Self> {
        let abi: Abi = serde_json::from_str(json)
            .map_err(|e| ChainError::artifact(format!("invalid ABI JSON: {e}")))?;
        Ok(Self::new(abi))
    }

    /// Returns the underlying ABI descriptor.
    #[must_use]
    pub const fn abi(&self) -> &Abi {
        &self.abi
    }

    /// Encodes a function call into call-data bytes.
    ///
    /// The output is the 4-byte selector followed by the ABI-encoded
    /// arguments.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::FunctionNotFound` if no function with the
    /// given name exists, or `ChainError::ArgumentTypeMismatch` if the
    /// argument count or an argument's shape does not match the
    /// declared parameters.
    pub fn encode_call(&self, name: &str, args: &[Token]) -> ChainResult<Bytes> {
        let function = self.resolve(name, args.len())?;

        for (param, token) in function.inputs.iter().zip(args) {
            if !token.type_check(&param.kind) {
                return Err(ChainError::argument_type_mismatch(format!(
                    "{name}: parameter `{}` expects {}, got {token:?}",
                    param.name, param.kind
                )));
            }
        }

        function
            .encode_input(args)
            .map(Bytes::from)
            .map_err(|e| ChainError::argument_type_mismatch(format!("{name}: {e}")))
    }

    /// Decodes returned bytes into typed values.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::FunctionNotFound` if no function with the
    /// given name exists, or `ChainError::ArgumentTypeMismatch` if the
    /// bytes do not decode against the declared output types.
    pub fn decode_output(&self, name: &str, data: &[u8]) -> ChainResult<Vec<Token>> {
        let function = self
            .abi
            .functions()
            .find(|f| f.name == name)
            .ok_or_else(|| ChainError::function_not_found(name))?;

        function
            .decode_output(data)
            .map_err(|e| ChainError::argument_type_mismatch(format!("{name}: {e}")))
    }

    /// Encodes contract-creation init-code.
    ///
    /// Appends ABI-encoded constructor arguments to the bytecode. A
    /// contract without a declared constructor deploys with the bare
    /// bytecode.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::ArgumentTypeMismatch` if arguments are
    /// passed to a constructor that takes none, or if an argument's
    /// shape does not match.
    pub fn encode_constructor(&self, bytecode: &[u8], args: &[Token]) -> ChainResult<Bytes> {
        match self.abi.constructor() {
            Some(ctor) => {
                if ctor.inputs.len() != args.len() {
                    return Err(ChainError::argument_type_mismatch(format!(
                        "constructor expects {} arguments, got {}",
                        ctor.inputs.len(),
                        args.len()
                    )));
                }
                ctor.encode_input(bytecode.to_vec(), args)
                    .map(Bytes::from)
                    .map_err(|e| ChainError::argument_type_mismatch(format!("constructor: {e}")))
            }
            None if args.is_empty() => Ok(Bytes::from(bytecode.to_vec())),
            None => Err(ChainError::argument_type_mismatch(
                "constructor takes no arguments",
            )),
        }
    }

    /// Resolves a function by exact name and arity.
    fn resolve(&self, name: &str, arity: usize) -> ChainResult<&Function> {
        let mut by_name = self.abi.functions().filter(|f| f.name == name).peekable();
        if by_name.peek().is_none() {
            return Err(ChainError::function_not_found(name));
        }
        by_name.find(|f| f.inputs.len() == arity).ok_or_else(|| {
            ChainError::argument_type_mismatch(format!("{name}: no overload with {arity} arguments"))
        })
    }
}

/// A deployed contract instance.
///
/// Binds encode/decode operations to an address; holds no mutable
/// state.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    address: Address,
    codec: AbiCodec,
}

impl ContractHandle {
    /// Creates a handle for a deployed contract.
    #[must_use]
    pub const fn new(address: Address, codec: AbiCodec) -> Self {
        Self { address, codec }
    }

    /// Returns the contract address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the codec bound to this contract's ABI.
    #[must_use]
    pub const fn codec(&self) -> &AbiCodec {
        &self.codec
    }
}
