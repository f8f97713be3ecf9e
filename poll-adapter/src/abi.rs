// ABI binding for the deployed poll contract

use ethers::prelude::abigen;

abigen!(
    VotingContract,
    r#"[
        function getTitle() external view returns (string memory)
        function getOptions() external view returns (string[] memory)
        function expiryBlockNumber() external view returns (uint256)
        function votesAmount() external view returns (uint256)
        function getVotesByIndex(uint256 index) external view returns (uint256)
        function getMyOption(address voter) external view returns (uint256)
        function isVoted(address voter) external view returns (bool)
        function vote(uint256 option) external
    ]"#
);
