use crate::core::observable::{ObservableState, Subscription};
use crate::domain::model::UserViewData;
use crate::domain::ports::{DetailRender, ListRender};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// 把使用者列表綁定到 [`ListRender`]；建立時訂閱，teardown 時取消
pub struct ListAdapter<R: ListRender> {
    view: Rc<RefCell<R>>,
    subscription: Option<Subscription<Vec<UserViewData>>>,
}

impl<R: ListRender + 'static> ListAdapter<R> {
    pub fn attach(state: &ObservableState<Vec<UserViewData>>, view: R) -> Self {
        let view = Rc::new(RefCell::new(view));
        let target = Rc::clone(&view);
        let subscription = state.subscribe(move |users| target.borrow_mut().render(users));
        Self {
            view,
            subscription: Some(subscription),
        }
    }

    pub fn view(&self) -> Ref<'_, R> {
        self.view.borrow()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl<R: ListRender> Drop for ListAdapter<R> {
    fn drop(&mut self) {
        self.subscription.take();
    }
}

pub struct DetailAdapter<R: DetailRender> {
    view: Rc<RefCell<R>>,
    subscription: Option<Subscription<UserViewData>>,
}

impl<R: DetailRender + 'static> DetailAdapter<R> {
    pub fn attach(state: &ObservableState<UserViewData>, view: R) -> Self {
        let view = Rc::new(RefCell::new(view));
        let target = Rc::clone(&view);
        let subscription = state.subscribe(move |user| target.borrow_mut().render(user));
        Self {
            view,
            subscription: Some(subscription),
        }
    }

    pub fn view(&self) -> Ref<'_, R> {
        self.view.borrow()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl<R: DetailRender> Drop for DetailAdapter<R> {
    fn drop(&mut self) {
        self.subscription.take();
    }
}
