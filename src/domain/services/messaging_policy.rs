//! Follow relationship required for a direct message to be delivered.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagingPolicy {
    /// The sender must follow the receiver.
    #[default]
    SenderFollowsReceiver,
    /// The receiver must follow the sender.
    ReceiverFollowsSender,
    /// Both must follow each other.
    Mutual,
}

/// Which follow edges a policy needs to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredEdges {
    pub sender_to_receiver: bool,
    pub receiver_to_sender: bool,
}

impl MessagingPolicy {
    pub fn required_edges(&self) -> RequiredEdges {
        match self {
            Self::SenderFollowsReceiver => RequiredEdges {
                sender_to_receiver: true,
                receiver_to_sender: false,
            },
            Self::ReceiverFollowsSender => RequiredEdges {
                sender_to_receiver: false,
                receiver_to_sender: true,
            },
            Self::Mutual => RequiredEdges {
                sender_to_receiver: true,
                receiver_to_sender: true,
            },
        }
    }

    /// Decide given the state of both edges.
    pub fn permits(&self, sender_follows_receiver: bool, receiver_follows_sender: bool) -> bool {
        let required = self.required_edges();
        (!required.sender_to_receiver || sender_follows_receiver)
            && (!required.receiver_to_sender || receiver_follows_sender)
    }
}
