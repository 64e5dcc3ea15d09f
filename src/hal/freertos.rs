//! FreeRTOS implementations of the wake signal and UART permit.
//!
//! - [`TaskNotifyWake`]: direct-to-task notification. Waiting suspends the
//!   worker task. Notifying never yields; the vector yields on `true`.
//! - [`FreeRtosMutex`]: statically allocated FreeRTOS mutex.
//!
//! Both are meant to live in `static`s.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::num::NonZeroU32;
use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use esp_idf_svc::hal::{delay, task};
use esp_idf_svc::sys;

use crate::sync::{Permit, WakeSignal};

/// queueQUEUE_TYPE_MUTEX
const QUEUE_TYPE_MUTEX: u8 = 1;
/// queueSEND_TO_BACK
const SEND_TO_BACK: sys::BaseType_t = 0;

const WAKE_BIT: NonZeroU32 = match NonZeroU32::new(1) {
    Some(bit) => bit,
    None => unreachable!(),
};

/// Wake signal bound to one task.
///
/// Call [`bind_current`](Self::bind_current) from the worker task before
/// enabling the interrupts that notify it. Notifications before binding
/// are dropped.
pub struct TaskNotifyWake {
    task: AtomicPtr<sys::tskTaskControlBlock>,
}

impl TaskNotifyWake {
    pub const fn new() -> Self {
        Self {
            task: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Bind to the calling task.
    pub fn bind_current(&self) {
        if let Some(handle) = task::current() {
            self.task.store(handle, Ordering::Release);
        }
    }
}

impl WakeSignal for TaskNotifyWake {
    fn notify_from_isr(&self) -> bool {
        let handle = self.task.load(Ordering::Acquire);
        if handle.is_null() {
            return false;
        }

        // SAFETY: handle came from task::current() of a task that never exits
        let (_, higher_prio_woken) = unsafe { task::notify(handle, WAKE_BIT) };
        higher_prio_woken
    }

    fn wait(&self) {
        // Infinite block: returns only when notified.
        while task::wait_notification(delay::BLOCK).is_none() {}
    }
}

impl Default for TaskNotifyWake {
    fn default() -> Self {
        Self::new()
    }
}

/// Statically allocated FreeRTOS mutex.
///
/// [`init`](Self::init) must run once before first use; the control block
/// lives inside `self`, hence `&'static`.
pub struct FreeRtosMutex {
    storage: UnsafeCell<MaybeUninit<sys::StaticQueue_t>>,
    handle: AtomicPtr<sys::QueueDefinition>,
}

// SAFETY: storage is handed to FreeRTOS once in init() and only touched by
// the kernel afterwards; the handle is published atomically.
unsafe impl Sync for FreeRtosMutex {}

impl FreeRtosMutex {
    pub const fn new() -> Self {
        Self {
            storage: UnsafeCell::new(MaybeUninit::uninit()),
            handle: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Create the kernel mutex. A second call is a no-op.
    pub fn init(&'static self) {
        if !self.handle.load(Ordering::Acquire).is_null() {
            return;
        }

        // SAFETY: storage is 'static and not yet registered with the kernel
        let handle = unsafe {
            sys::xQueueCreateMutexStatic(QUEUE_TYPE_MUTEX, (*self.storage.get()).as_mut_ptr())
        };
        self.handle.store(handle, Ordering::Release);
    }

    fn handle(&self) -> sys::QueueHandle_t {
        self.handle.load(Ordering::Acquire)
    }
}

impl Permit for FreeRtosMutex {
    fn acquire(&self) {
        let handle = self.handle();
        if handle.is_null() {
            return;
        }

        // SAFETY: handle is a live mutex created in init()
        while unsafe { sys::xQueueSemaphoreTake(handle, delay::BLOCK) } == 0 {}
    }

    fn release(&self) {
        let handle = self.handle();
        if handle.is_null() {
            return;
        }

        // SAFETY: handle is a live mutex created in init(); mutexes carry no item
        unsafe {
            sys::xQueueGenericSend(handle, ptr::null(), 0, SEND_TO_BACK);
        }
    }
}

impl Default for FreeRtosMutex {
    fn default() -> Self {
        Self::new()
    }
}
