//! The product manager contract interface.

alloy::sol! {
    interface ProductManager {
        function totalSupply() external view returns (uint256);
        function shareValue() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function redeem(uint256 amount) external;
        function acceptProposal(address author, bytes32 proof, uint256 amount) external;
        function claimAuthorship(address author, bytes32 proof) external;
        function proposeIteration(address author, bytes32 proof, string location) external;

        event IterationProposal(address author, bytes32 proof, string location);
    }
}

pub use ProductManager::*;
