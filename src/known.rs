/// Error signatures worth trying when a project's own errors don't explain
/// a revert.  Solidity builtins first, then OpenZeppelin 5.x custom errors.
pub const KNOWN_ERRORS: &[&str] = &[
	// -- Solidity builtins --
	"Error(string)",
	"Panic(uint256)",
	// -- access --
	"AccessControlUnauthorizedAccount(address,bytes32)",
	"AccessControlBadConfirmation()",
	"OwnableUnauthorizedAccount(address)",
	"OwnableInvalidOwner(address)",
	// -- security --
	"ReentrancyGuardReentrantCall()",
	"EnforcedPause()",
	"ExpectedPause()",
	// -- proxy / initializable --
	"InvalidInitialization()",
	"NotInitializing()",
	// -- utils --
	"AddressEmptyCode(address)",
	"FailedCall()",
	"SafeERC20FailedOperation(address)",
	// -- tokens --
	"ERC20InsufficientBalance(address,uint256,uint256)",
	"ERC20InsufficientAllowance(address,uint256,uint256)",
	"ERC20InvalidSender(address)",
	"ERC20InvalidReceiver(address)",
	"ERC20InvalidApprover(address)",
	"ERC20InvalidSpender(address)",
	"ERC721NonexistentToken(uint256)",
	"ERC721IncorrectOwner(address,uint256,address)",
	"ERC721InvalidOwner(address)",
	"ERC721InvalidReceiver(address)",
	"ERC721InsufficientApproval(address,uint256)",
];
