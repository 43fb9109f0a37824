//! # Mediator Pattern
//!
//! Participants never talk to each other directly; every message goes through
//! the chatroom, which knows who is registered.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub struct Chatroom {
    participants: RefCell<Vec<Rc<Participant>>>,
}

impl Chatroom {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            participants: RefCell::new(Vec::new()),
        })
    }

    pub fn register_participant(&self, participant: Rc<Participant>) {
        self.participants.borrow_mut().push(participant);
    }

    pub fn participant_count(&self) -> usize {
        self.participants.borrow().len()
    }

    /// Delivers to every registered participant, the sender included, in
    /// registration order.
    pub fn send_all(&self, msg: &str, sender: &Participant) -> Vec<String> {
        self.participants
            .borrow()
            .iter()
            .map(|participant| participant.receive(msg, sender))
            .collect()
    }
}

pub struct Participant {
    name: String,
    // Weak: the room owns its participants, not the other way round
    chatroom: Weak<Chatroom>,
}

impl Participant {
    pub fn new(name: impl Into<String>, chatroom: &Rc<Chatroom>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            chatroom: Rc::downgrade(chatroom),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lines printed by the receivers. Nothing is delivered once
    /// the chatroom is gone.
    pub fn send_all(&self, msg: &str) -> Vec<String> {
        match self.chatroom.upgrade() {
            Some(room) => room.send_all(msg, self),
            None => Vec::new(),
        }
    }

    pub fn receive(&self, msg: &str, sender: &Participant) -> String {
        format!("{} received message from {} : {}", self.name, sender.name, msg)
    }
}

/// Registers `names` in a fresh chatroom and has `sender` greet everyone.
pub fn run(names: &[String], sender: &str, message: &str) -> Vec<String> {
    let chatroom = Chatroom::new();
    let participants: Vec<Rc<Participant>> = names
        .iter()
        .map(|name| Participant::new(name.as_str(), &chatroom))
        .collect();

    for participant in &participants {
        chatroom.register_participant(Rc::clone(participant));
    }

    participants
        .iter()
        .find(|p| p.name() == sender)
        .map(|p| p.send_all(message))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["Akshay".to_string(), "Rohan".to_string(), "Raj".to_string()]
    }

    #[test]
    fn test_broadcast_reaches_everyone_in_order() {
        let lines = run(&names(), "Akshay", "Hi");
        assert_eq!(
            lines,
            vec![
                "Akshay received message from Akshay : Hi",
                "Rohan received message from Akshay : Hi",
                "Raj received message from Akshay : Hi",
            ]
        );
    }

    #[test]
    fn test_unregistered_participant_gets_nothing() {
        let room = Chatroom::new();
        let akshay = Participant::new("Akshay", &room);
        let _lurker = Participant::new("Lurker", &room);
        room.register_participant(Rc::clone(&akshay));

        let lines = akshay.send_all("Hello");
        assert_eq!(lines, vec!["Akshay received message from Akshay : Hello"]);
        assert_eq!(room.participant_count(), 1);
    }

    #[test]
    fn test_send_after_room_dropped() {
        let room = Chatroom::new();
        let rohan = Participant::new("Rohan", &room);
        room.register_participant(Rc::clone(&rohan));
        drop(room);

        assert!(rohan.send_all("anyone?").is_empty());
    }

    #[test]
    fn test_unknown_sender_sends_nothing() {
        assert!(run(&names(), "Nobody", "Hi").is_empty());
    }
}
