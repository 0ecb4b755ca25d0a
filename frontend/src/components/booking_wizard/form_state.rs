//! 向导状态管理模块
//!
//! 把 `BookingWizard` 与字段错误包装为 `Copy` 的信号句柄，负责：
//! - 草稿的读取与修改
//! - 步骤切换（前进时校验当前步骤）
//! - 草稿到请求对象的转换

use chrono::NaiveDate;
use housekeeper_shared::booking::CreateBookingRequest;
use housekeeper_shared::catalog::Service;
use housekeeper_shared::validation::{FieldError, error_for};
use housekeeper_shared::wizard::{BookingDraft, BookingWizard, WizardStep};
use leptos::prelude::*;

/// 用户本地时区的今天
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Clone, Copy)]
pub struct WizardState {
    wizard: RwSignal<BookingWizard>,
    errors: RwSignal<Vec<FieldError>>,
    pub submitting: RwSignal<bool>,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            wizard: RwSignal::new(BookingWizard::new()),
            errors: RwSignal::new(Vec::new()),
            submitting: RwSignal::new(false),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.with(|w| w.step())
    }

    /// 读取草稿（追踪变化）
    pub fn draft<R>(&self, f: impl FnOnce(&BookingDraft) -> R) -> R {
        self.wizard.with(|w| f(w.draft()))
    }

    /// 修改草稿字段，并清除该字段的错误
    pub fn edit(&self, field: &str, f: impl FnOnce(&mut BookingDraft)) {
        self.wizard.update(|w| f(w.draft_mut()));
        self.errors.update(|errors| errors.retain(|e| e.field != field));
    }

    pub fn select_service(&self, service: &Service) {
        self.edit("service", |d| d.select_service(service));
    }

    /// 预选服务进入时重建向导
    pub fn start_with(&self, service: &Service) {
        self.wizard.set(BookingWizard::with_service(service));
        self.errors.set(Vec::new());
    }

    /// 校验当前步骤并前进；失败时记录字段错误
    pub fn next(&self) -> bool {
        let today = today();
        let mut result = Ok(WizardStep::Service);
        self.wizard.update(|w| result = w.advance(today));
        match result {
            Ok(_) => {
                self.errors.set(Vec::new());
                true
            }
            Err(errors) => {
                self.errors.set(errors);
                false
            }
        }
    }

    pub fn back(&self) {
        self.wizard.update(|w| {
            w.back();
        });
        self.errors.set(Vec::new());
    }

    pub fn jump_to(&self, step: WizardStep) {
        let mut moved = false;
        self.wizard.update(|w| moved = w.jump_to(step));
        if moved {
            self.errors.set(Vec::new());
        }
    }

    /// 确认步骤：重新校验全部字段并生成请求
    pub fn to_request(&self) -> Option<CreateBookingRequest> {
        match self.wizard.with_untracked(|w| w.to_request(today())) {
            Ok(req) => Some(req),
            Err(errors) => {
                self.errors.set(errors);
                None
            }
        }
    }

    pub fn error(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| error_for(e, field).map(str::to_string)))
    }

    /// 未绑定到输入框的错误（如步骤或提交错误）
    pub fn general_errors(&self) -> Signal<Vec<String>> {
        let errors = self.errors;
        Signal::derive(move || {
            errors.with(|e| {
                e.iter()
                    .filter(|e| matches!(e.field.as_str(), "step" | "submit"))
                    .map(|e| e.message.clone())
                    .collect()
            })
        })
    }

    pub fn fail(&self, message: String) {
        self.errors.set(vec![FieldError::new("submit", message)]);
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
