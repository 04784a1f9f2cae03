//! Жизненный цикл через связку ядра / Lifecycle through the kernel glue

use kernel::{
    Error, IntLevel, Kernel, Machine, SchedConfig, SimMachine, ThreadFlags, ThreadId,
    ThreadStatus, Tier,
};

fn boot() -> Kernel<SimMachine> {
    Kernel::new(SimMachine::new(), SchedConfig::DEFAULT)
}

#[test]
fn finishing_threads_hand_over_in_tier_order() {
    let mut k = boot();
    let a = k.fork("A", 120, ThreadFlags::empty()).unwrap();
    let b = k.fork("B", 60, ThreadFlags::empty()).unwrap();
    let c = k.fork("C", 10, ThreadFlags::empty()).unwrap();

    assert!(k.finish());
    assert_eq!(k.current(), a);
    assert!(!k.threads.contains(ThreadId::BOOT));

    assert!(k.finish());
    assert_eq!(k.current(), b);
    assert!(k.finish());
    assert_eq!(k.current(), c);

    // Больше некого запускать / Nothing left to run
    assert!(!k.finish());
    assert_eq!(k.current_thread().status, ThreadStatus::Finished);
    assert_eq!(k.threads.len(), 1);
    assert_eq!(k.machine.switches, [(ThreadId::BOOT, a), (a, b), (b, c)]);
}

#[test]
fn interrupt_level_is_restored_after_each_call() {
    let mut k = boot();
    assert_eq!(k.machine.interrupt_level(), IntLevel::On);
    k.fork("A", 70, ThreadFlags::empty()).unwrap();
    assert_eq!(k.machine.interrupt_level(), IntLevel::On);
    k.yield_now();
    assert_eq!(k.machine.interrupt_level(), IntLevel::On);
    k.advance(250);
    assert_eq!(k.machine.interrupt_level(), IntLevel::On);
}

#[test]
fn yield_without_rivals_keeps_running() {
    let mut k = boot();
    k.yield_now();
    assert_eq!(k.current(), ThreadId::BOOT);
    assert_eq!(k.current_thread().status, ThreadStatus::Running);
    assert!(k.machine.switches.is_empty());
}

#[test]
fn yield_requeues_the_current_thread() {
    let mut k = boot();
    let a = k.fork("A", 30, ThreadFlags::empty()).unwrap();
    k.yield_now();
    assert_eq!(k.current(), a);
    assert_eq!(k.scheduler.queued_tier(ThreadId::BOOT), Some(Tier::Low));
    assert_eq!(k.threads[ThreadId::BOOT].status, ThreadStatus::Ready);
}

#[test]
fn caller_errors_are_reported() {
    let mut k = boot();
    assert_eq!(k.fork("bad", 150, ThreadFlags::empty()), Err(Error::InvalidPriority(150)));
    assert_eq!(k.wake(ThreadId(42)), Err(Error::UnknownThread(ThreadId(42))));

    let a = k.fork("A", 60, ThreadFlags::empty()).unwrap();
    assert_eq!(k.wake(a), Err(Error::NotBlocked(a)));
}

#[test]
fn sleeping_thread_is_redispatched_from_idle() {
    let mut k = boot();
    let a = k.fork("A", 60, ThreadFlags::empty()).unwrap();

    assert!(k.sleep(false));
    assert_eq!(k.current(), a);
    assert_eq!(k.threads[ThreadId::BOOT].status, ThreadStatus::Blocked);

    k.advance(30);
    assert!(!k.sleep(false), "nothing ready, processor idles");
    assert_eq!(k.threads[a].burst_estimate, 15);
    assert!(!k.idle());

    k.wake(ThreadId::BOOT).unwrap();
    assert!(k.idle());
    assert_eq!(k.current(), ThreadId::BOOT);
    assert_eq!(k.threads[a].status, ThreadStatus::Blocked);
    assert!(k.threads.contains(a));
}

#[test]
fn idling_thread_woken_by_itself_is_selected_again() {
    let mut k = boot();
    let a = k.fork("A", 60, ThreadFlags::empty()).unwrap();
    assert!(k.finish());
    assert_eq!(k.current(), a);

    assert!(!k.sleep(false));
    assert!(k.is_idling());
    k.advance(50);
    k.wake(a).unwrap();
    assert_eq!(k.scheduler.queued_tier(a), Some(Tier::Medium));

    assert!(k.idle());
    assert!(!k.is_idling());
    assert_eq!(k.current(), a);
    assert_eq!(k.current_thread().status, ThreadStatus::Running);
    assert_eq!(k.current_thread().start_time, 50);
    assert!(k.scheduler.is_empty());
    assert_eq!(k.scheduler.pending_destruction(), None);
    assert!(k.threads.contains(a));
}

#[test]
#[should_panic(expected = "is not idling")]
fn idle_without_a_failed_dispatch_is_fatal() {
    let mut k = boot();
    k.idle();
}

#[test]
fn timer_preempts_low_thread_for_medium_arrival() {
    let mut k = boot();
    let m = k.fork("M", 60, ThreadFlags::empty()).unwrap();

    k.advance(99);
    assert_eq!(k.current(), ThreadId::BOOT);
    k.advance(1);
    assert_eq!(k.current(), m);
    assert_eq!(k.machine.last_switch(), Some((ThreadId::BOOT, m)));
}

#[test]
fn low_tier_round_robins_on_the_quantum() {
    let mut k = boot();
    let l = k.fork("L", 10, ThreadFlags::empty()).unwrap();

    k.advance(100);
    assert_eq!(k.current(), l);
    k.advance(100);
    assert_eq!(k.current(), ThreadId::BOOT);
    k.advance(100);
    assert_eq!(k.current(), l);
}

#[test]
fn starving_thread_climbs_while_high_thread_runs() {
    let mut k = boot();
    let h = k.fork("H", 140, ThreadFlags::empty()).unwrap();
    let l = k.fork("L", 10, ThreadFlags::empty()).unwrap();
    assert!(k.finish());
    assert_eq!(k.current(), h);

    k.advance(6000);
    assert_eq!(k.current(), h, "medium never preempts high");
    assert_eq!(k.threads[l].priority.get(), 50);
    assert_eq!(k.scheduler.queued_tier(l), Some(Tier::Medium));
}
