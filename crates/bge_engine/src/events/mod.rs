//! Event system for actor lifecycle notifications
//! Key principles:
//! - Key-value arguments (no order dependency)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)
//! - Queuing support (immediate + deferred delivery)

use crate::actors::{ActorId, ComponentId};
use std::collections::HashMap;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Actor was created and added to the game
    ActorCreated,
    /// Actor was destroyed and removed from the game
    ActorDestroyed,
    /// Actor components were modified through overrides
    ActorModified,
}

/// Variant for type-safe event arguments
/// Uses key-value pairs to avoid order dependency problems
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventArg {
    /// Actor identifier
    ActorId(ActorId),
    /// Actor type tag
    ActorType(String),
    /// Component identifier
    ComponentId(ComponentId),
}

/// Event with type ID and key-value arguments
#[derive(Debug, Clone)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
    /// Game time when the event was created (milliseconds)
    pub timestamp: f64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Create a new event with the given type and timestamp
    pub fn new(event_type: EventType, timestamp: f64) -> Self {
        Self {
            event_type,
            timestamp,
            args: HashMap::new(),
        }
    }

    /// Add an argument to the event (builder pattern)
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// Get actor_id argument if present
    pub fn get_actor_id(&self) -> Option<ActorId> {
        if let Some(EventArg::ActorId(id)) = self.get_arg("actor_id") {
            Some(*id)
        } else {
            None
        }
    }

    /// Get actor_type argument if present
    pub fn get_actor_type(&self) -> Option<&str> {
        if let Some(EventArg::ActorType(actor_type)) = self.get_arg("actor_type") {
            Some(actor_type)
        } else {
            None
        }
    }

    /// Get component_id argument if present
    pub fn get_component_id(&self) -> Option<ComponentId> {
        if let Some(EventArg::ComponentId(id)) = self.get_arg("component_id") {
            Some(*id)
        } else {
            None
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &Event) -> bool;
}

/// Event system with registration and queuing
/// Follows chain of responsibility pattern
pub struct EventSystem {
    immediate_queue: Vec<Event>,
    deferred_queue: Vec<(f64, Event)>,
    handlers: HashMap<EventType, Vec<Box<dyn EventHandler>>>,
    current_time: f64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            immediate_queue: Vec::new(),
            deferred_queue: Vec::new(),
            handlers: HashMap::new(),
            current_time: 0.0,
        }
    }

    /// Update current game time (milliseconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Current game time (milliseconds since start)
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Register a handler for a specific event type
    /// Only handlers registered for this type will be notified
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Send event for immediate handling this frame
    pub fn send(&mut self, event: Event) {
        self.immediate_queue.push(event);
    }

    /// Post event for deferred delivery at specified time
    pub fn post(&mut self, delivery_time: f64, event: Event) {
        self.deferred_queue.push((delivery_time, event));
    }

    /// Number of events waiting for dispatch
    pub fn pending(&self) -> usize {
        self.immediate_queue.len() + self.deferred_queue.len()
    }

    /// Dispatch all pending events
    /// Processes immediate queue first, then due deferred events
    pub fn dispatch(&mut self) {
        let immediate = std::mem::take(&mut self.immediate_queue);
        for event in immediate {
            self.dispatch_event(&event);
        }

        let mut i = 0;
        while i < self.deferred_queue.len() {
            if self.deferred_queue[i].0 <= self.current_time {
                let (_, event) = self.deferred_queue.remove(i);
                self.dispatch_event(&event);
            } else {
                i += 1;
            }
        }
    }

    /// Dispatch single event to registered handlers
    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: &Event) {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type) {
            for handler in handlers.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }

    /// Clear all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSystem")
            .field("immediate", &self.immediate_queue.len())
            .field("deferred", &self.deferred_queue.len())
            .field("handler_types", &self.handlers.len())
            .field("current_time", &self.current_time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestHandler {
        received: Rc<RefCell<Vec<(&'static str, EventType)>>>,
        label: &'static str,
        consume: bool,
    }

    impl EventHandler for TestHandler {
        fn on_event(&mut self, event: &Event) -> bool {
            self.received.borrow_mut().push((self.label, event.event_type));
            self.consume
        }
    }

    fn handler(
        received: &Rc<RefCell<Vec<(&'static str, EventType)>>>,
        label: &'static str,
        consume: bool,
    ) -> Box<TestHandler> {
        Box::new(TestHandler {
            received: Rc::clone(received),
            label,
            consume,
        })
    }

    #[test]
    fn test_immediate_dispatch() {
        let received = Rc::default();
        let mut system = EventSystem::new();
        system.register_handler(EventType::ActorCreated, handler(&received, "a", false));

        let event = Event::new(EventType::ActorCreated, 0.0)
            .with_arg("actor_id", EventArg::ActorId(ActorId::new(42)));
        system.send(event);
        assert_eq!(system.pending(), 1);
        system.dispatch();

        assert_eq!(system.pending(), 0);
        assert_eq!(*received.borrow(), vec![("a", EventType::ActorCreated)]);
    }

    #[test]
    fn test_only_registered_types_delivered() {
        let received = Rc::default();
        let mut system = EventSystem::new();
        system.register_handler(EventType::ActorDestroyed, handler(&received, "a", false));

        system.send(Event::new(EventType::ActorCreated, 0.0));
        system.dispatch();

        assert!(received.borrow().is_empty());
    }

    #[test]
    fn test_deferred_dispatch() {
        let received = Rc::default();
        let mut system = EventSystem::new();
        system.register_handler(EventType::ActorModified, handler(&received, "a", false));
        system.update_time(0.0);

        system.post(1000.0, Event::new(EventType::ActorModified, 0.0));

        system.update_time(500.0);
        system.dispatch();
        assert_eq!(system.deferred_queue.len(), 1);
        assert!(received.borrow().is_empty());

        system.update_time(1000.0);
        system.dispatch();
        assert_eq!(system.deferred_queue.len(), 0);
        assert_eq!(received.borrow().len(), 1);
    }

    #[test]
    fn test_event_consumption() {
        let received = Rc::default();
        let mut system = EventSystem::new();
        system.register_handler(EventType::ActorCreated, handler(&received, "first", true));
        system.register_handler(EventType::ActorCreated, handler(&received, "second", false));

        system.send(Event::new(EventType::ActorCreated, 0.0));
        system.dispatch();

        assert_eq!(*received.borrow(), vec![("first", EventType::ActorCreated)]);
    }

    #[test]
    fn test_clear_drops_queued_events() {
        let mut system = EventSystem::new();
        system.send(Event::new(EventType::ActorCreated, 0.0));
        system.post(10.0, Event::new(EventType::ActorDestroyed, 0.0));

        system.clear();
        assert_eq!(system.pending(), 0);
    }

    #[test]
    fn test_typed_argument_accessors() {
        let event = Event::new(EventType::ActorCreated, 12.0)
            .with_arg("actor_id", EventArg::ActorId(ActorId::new(3)))
            .with_arg("actor_type", EventArg::ActorType("Tank".to_string()))
            .with_arg("component_id", EventArg::ComponentId(ComponentId::from_name("TransformComponent")));

        assert_eq!(event.get_actor_id(), Some(ActorId::new(3)));
        assert_eq!(event.get_actor_type(), Some("Tank"));
        assert_eq!(event.get_component_id(), Some(ComponentId::from_name("TransformComponent")));
        assert_eq!(Event::new(EventType::ActorCreated, 0.0).get_actor_id(), None);
    }
}
