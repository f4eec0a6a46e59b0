//! ABI surface of the contracts the harness drives.
//!
//! The call surfaces are consumed, not defined, by this crate: the encodings
//! below must match the deployed contracts exactly. The embedded contract
//! simulations decode the same types, so direct calls and meta-transactions
//! share one wire format.

use alloy::primitives::{keccak256, B256};
use alloy::sol;
use alloy::sol_types::SolValue;

sol! {
    /// Meta-transaction envelope submitted to the trusted forwarder.
    ///
    /// `from` is the claimed sender; the forwarder only executes the inner
    /// call if the signature over [`forward_request_digest`] recovers to it.
    #[derive(Debug)]
    struct ForwardRequest {
        address from;
        address to;
        uint256 nonce;
        bytes data;
    }

    interface IAssetERC1155 {
        function safeTransferFrom(address from, address to, uint256 id, uint256 value, bytes calldata data) external;
        function safeBatchTransferFrom(address from, address to, uint256[] calldata ids, uint256[] calldata values, bytes calldata data) external;
        function mint(address account, uint256 id, uint256 value, bytes calldata data) external;
        function mintMultiple(address account, uint256[] calldata ids, uint256[] calldata values, bytes calldata data) external;
        function setBouncer(address bouncer, bool enabled) external;
        function balanceOf(address account, uint256 id) external view returns (uint256);
        function balanceOfBatch(address[] calldata accounts, uint256[] calldata ids) external view returns (uint256[] memory);
        function totalSupply(uint256 id) external view returns (uint256);
        function tokenURI(uint256 id) external view returns (string memory);
    }

    interface IForwarder {
        function getNonce(address from) external view returns (uint256);
        function execute(ForwardRequest calldata req, bytes calldata signature) external returns (bool);
    }
}

/// Digest a sender signs to authorize a [`ForwardRequest`].
///
/// Binds the claimed sender, the target, the per-sender nonce and the call
/// data; the forwarder recomputes it before recovering the signer.
pub fn forward_request_digest(req: &ForwardRequest) -> B256 {
    let data_hash = keccak256(&req.data);
    keccak256((req.from, req.to, req.nonce, data_hash).abi_encode())
}
