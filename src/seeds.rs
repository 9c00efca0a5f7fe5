//! Built-in course content so the service is useful without external config.

use crate::domain::{QuizModule, QuizQuestion};

fn q(prompt: &str, correct: &str, wrong: [&str; 3], explanation: &str) -> QuizQuestion {
  QuizQuestion {
    prompt: prompt.into(),
    correct: correct.into(),
    wrong: wrong.iter().map(|s| s.to_string()).collect(),
    explanation: explanation.into(),
  }
}

pub fn seed_modules() -> Vec<QuizModule> {
  vec![
    QuizModule {
      title: "Web3 Foundations".into(),
      summary: "Blocks, consensus and why decentralization matters.".into(),
      questions: vec![
        q("What links each block to the previous one?",
          "The hash of the previous block header",
          ["A shared database row id", "The miner's IP address", "A timestamp only"],
          "Each header commits to its parent's hash, forming the chain."),
        q("What does a consensus mechanism decide?",
          "Which valid history the network agrees on",
          ["Which wallet app users install", "The price of the native token", "Who may read the chain"],
          "Consensus orders and finalizes blocks across independent nodes."),
        q("Why is a public blockchain called permissionless?",
          "Anyone can run a node and submit transactions",
          ["It has no fees", "It cannot be upgraded", "It is operated by one company"],
          "Participation does not require approval from a gatekeeper."),
        q("What is finality?",
          "The point after which a block cannot be reverted",
          ["The last block ever produced", "A wallet's final balance", "The end of a token sale"],
          "Finality bounds how long a transaction may be reorganized away."),
      ],
    },
    QuizModule {
      title: "Wallets and Keys".into(),
      summary: "Key pairs, seed phrases and signing.".into(),
      questions: vec![
        q("What does a wallet actually store?",
          "Private keys used to sign transactions",
          ["The user's tokens", "A copy of the whole chain", "Smart contract bytecode"],
          "Balances live on-chain; the wallet holds the keys that control them."),
        q("How is an EVM address derived?",
          "From the last 20 bytes of the Keccak-256 hash of the public key",
          ["From the user's email", "Randomly by the RPC node", "From the first transaction's hash"],
          "The address is a truncated hash of the public key."),
        q("What should you do with a seed phrase?",
          "Store it offline and never share it",
          ["Paste it into support chats", "Keep it in a cloud note", "Post a backup on social media"],
          "Anyone holding the phrase controls every derived account."),
      ],
    },
    QuizModule {
      title: "Smart Contracts".into(),
      summary: "Deterministic programs executed by every node.".into(),
      questions: vec![
        q("What is gas?",
          "A unit metering the computation a transaction consumes",
          ["A token burned on every block", "The fee paid to wallet vendors", "Storage on IPFS"],
          "Gas bounds execution so every node can replay it."),
        q("Why must contract execution be deterministic?",
          "Every node must reach the same resulting state",
          ["To make contracts cheaper", "So users can edit them later", "Because contracts run off-chain"],
          "Replicated execution only works if all replicas agree."),
        q("What does an ERC-20 allowance grant?",
          "Permission for a spender to transfer up to an amount of your tokens",
          ["Ownership of the token contract", "A loan from the protocol", "Voting rights in governance"],
          "approve sets the allowance that transferFrom consumes."),
        q("What is a reentrancy bug?",
          "An external call re-entering a function before state is updated",
          ["A contract deployed twice", "A transaction sent with too little gas", "A duplicated event log"],
          "Update state before external calls (checks-effects-interactions)."),
      ],
    },
    QuizModule {
      title: "Tokens and Burns".into(),
      summary: "Supply mechanics and on-chain rewards.".into(),
      questions: vec![
        q("What does burning a token do?",
          "Permanently removes it from circulating supply",
          ["Locks it for a week", "Moves it to a cold wallet", "Converts it into gas"],
          "Burned tokens are sent where no key can ever move them."),
        q("Where are tokens typically sent to be burned?",
          "An address nobody controls, such as the zero address",
          ["The deployer's wallet", "The exchange hot wallet", "A multisig treasury"],
          "Unspendable destinations make the burn verifiable."),
        q("What does an on-chain attestation usually store?",
          "A content hash committing to off-chain data",
          ["The full document text", "The user's private key", "An image of the certificate"],
          "A hash is cheap to store and proves the data was not altered."),
      ],
    },
  ]
}
