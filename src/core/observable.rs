//! Replay-1 state container.
//!
//! `ObservableState` always holds a current value. New subscribers are called
//! with it immediately, later emissions reach every registered handler in
//! subscription order. Everything here lives on the primary context; the
//! container is `!Send`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type Handler<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Slot<T> {
    id: u64,
    handler: Handler<T>,
}

struct Inner<T> {
    current: T,
    slots: Vec<Slot<T>>,
    next_id: u64,
    emitting: bool,
    pending: VecDeque<T>,
}

impl<T> Inner<T> {
    fn is_registered(&self, id: u64) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }
}

pub struct ObservableState<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: Clone + 'static> ObservableState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: initial,
                slots: Vec::new(),
                next_id: 0,
                emitting: false,
                pending: VecDeque::new(),
            })),
        }
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// 註冊 handler 並立即以目前的值呼叫一次
    pub fn subscribe<F>(&self, handler: F) -> Subscription<T>
    where
        F: FnMut(&T) + 'static,
    {
        let handler: Handler<T> = Rc::new(RefCell::new(handler));
        let (id, current, owns_round) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.slots.push(Slot {
                id,
                handler: Rc::clone(&handler),
            });
            // 重播期間的 emit 一樣要排隊
            let owns_round = !inner.emitting;
            inner.emitting = true;
            (id, inner.current.clone(), owns_round)
        };

        tracing::trace!(subscription = id, "subscriber registered");
        (&mut *handler.borrow_mut())(&current);

        if owns_round {
            self.drain();
        }

        Subscription {
            id,
            state: Rc::downgrade(&self.inner),
        }
    }

    /// 更新目前的值並依訂閱順序通知所有 handler。
    ///
    /// 在 handler 內呼叫 `emit` 會排入佇列，等這一輪通知結束後才送出。
    pub fn emit(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.emitting {
                inner.pending.push_back(value);
                return;
            }
            inner.emitting = true;
            inner.current = value;
        }

        self.notify();
        self.drain();
    }

    /// 依序送出排隊中的值，直到佇列清空
    fn drain(&self) {
        loop {
            {
                let mut inner = self.inner.borrow_mut();
                match inner.pending.pop_front() {
                    Some(next) => inner.current = next,
                    None => {
                        inner.emitting = false;
                        return;
                    }
                }
            }
            self.notify();
        }
    }

    /// 以目前的值通知一輪
    fn notify(&self) {
        let (current, handlers): (T, Vec<(u64, Handler<T>)>) = {
            let inner = self.inner.borrow();
            let handlers = inner
                .slots
                .iter()
                .map(|slot| (slot.id, Rc::clone(&slot.handler)))
                .collect();
            (inner.current.clone(), handlers)
        };

        for (id, handler) in handlers {
            // 同一輪中先前的 handler 可能已經取消了這個訂閱
            if !self.inner.borrow().is_registered(id) {
                continue;
            }
            (&mut *handler.borrow_mut())(&current);
        }
    }

    pub fn unsubscribe(&self, subscription: Subscription<T>) {
        subscription.unsubscribe();
    }
}

/// 訂閱憑證。不持有狀態本身；drop 時自動取消訂閱。
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<T> {
    id: u64,
    state: Weak<RefCell<Inner<T>>>,
}

impl<T> Subscription<T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .map(|inner| inner.borrow().is_registered(self.id))
            .unwrap_or(false)
    }

    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(inner) = self.state.upgrade() {
            if inner.borrow_mut().remove(self.id) {
                tracing::trace!(subscription = self.id, "subscriber removed");
            }
        }
        self.state = Weak::new();
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.detach();
    }
}
