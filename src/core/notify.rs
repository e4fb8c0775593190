use crate::core::value::Value;

/// Where a commit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Key,
    Pointer,
    Api,
}

/// Notifications observers can listen to. None of them can be canceled.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Opened,
    Closed,
    HighlightChanged {
        index: Option<usize>,
        text: Option<String>,
    },
    Selected {
        index: usize,
        text: String,
        data: Value,
        origin: Origin,
    },
}

/// Payload of the cancelable pre-select hook.
#[derive(Debug, Clone, PartialEq)]
pub struct PreSelect {
    pub index: usize,
    pub text: String,
    pub data: Value,
    pub origin: Origin,
}

type Observer = Box<dyn FnMut(&WidgetEvent) + Send>;
type PreSelectHook = Box<dyn FnMut(&PreSelect) -> bool + Send>;

#[derive(Default)]
pub struct Notifier {
    observers: Vec<Observer>,
    pre_select: Vec<PreSelectHook>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_event(&mut self, observer: impl FnMut(&WidgetEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Registers a hook that may veto a commit by returning `false`.
    pub fn on_pre_select(&mut self, hook: impl FnMut(&PreSelect) -> bool + Send + 'static) {
        self.pre_select.push(Box::new(hook));
    }

    pub fn emit(&mut self, event: &WidgetEvent) {
        for observer in self.observers.iter_mut() {
            observer(event);
        }
    }

    pub fn emit_all(&mut self, events: Vec<WidgetEvent>) {
        for event in &events {
            self.emit(event);
        }
    }

    /// Every hook sees the event; the commit proceeds only if none vetoed.
    pub fn allow(&mut self, event: &PreSelect) -> bool {
        self.pre_select
            .iter_mut()
            .fold(true, |allowed, hook| hook(event) && allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::{Notifier, Origin, PreSelect, WidgetEvent};
    use crate::core::value::Value;
    use std::sync::{Arc, Mutex};

    fn pre_select() -> PreSelect {
        PreSelect {
            index: 0,
            text: "pear".to_string(),
            data: Value::from("pear"),
            origin: Origin::Key,
        }
    }

    #[test]
    fn all_hooks_run_even_after_a_veto() {
        let calls = Arc::new(Mutex::new(0));
        let mut notifier = Notifier::new();
        notifier.on_pre_select(|_| false);
        let counter = Arc::clone(&calls);
        notifier.on_pre_select(move |_| {
            *counter.lock().expect("lock") += 1;
            true
        });
        assert!(!notifier.allow(&pre_select()));
        assert_eq!(*calls.lock().expect("lock"), 1);
    }

    #[test]
    fn no_hooks_means_allowed() {
        assert!(Notifier::new().allow(&pre_select()));
    }

    #[test]
    fn observers_receive_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut notifier = Notifier::new();
        notifier.on_event(move |event| sink.lock().expect("lock").push(event.clone()));
        notifier.emit_all(vec![WidgetEvent::Opened, WidgetEvent::Closed]);
        assert_eq!(
            *seen.lock().expect("lock"),
            vec![WidgetEvent::Opened, WidgetEvent::Closed]
        );
    }
}
