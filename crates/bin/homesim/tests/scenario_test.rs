//! End-to-end scenarios: a whole home wired to the event log sink.

use std::sync::Arc;
use std::time::Duration;

use homesim_adapter_console::EventLog;
use homesim_app::controller::{HomeController, Timing};
use homesim_app::device::SmartDevice;
use homesim_app::scheduler::TokioScheduler;
use homesim_domain::automation::{MorningMode, NightMode, VacationMode};
use homesim_domain::device::{DeviceKind, DeviceType};

const MINUTE: Duration = Duration::from_secs(60);

fn home() -> (HomeController, Arc<EventLog>) {
    let scheduler = Arc::new(TokioScheduler::current().unwrap());
    let mut home = HomeController::new(scheduler).with_timing(Timing {
        minute: MINUTE,
        motion_quiet_period: MINUTE * 5,
    });
    let log = Arc::new(EventLog::new());
    home.add_listener(log.clone());
    home.register_mode("night", Arc::new(NightMode));
    home.register_mode("morning", Arc::new(MorningMode));
    home.register_mode("vacation", Arc::new(VacationMode));
    (home, log)
}

fn messages(log: &EventLog) -> Vec<String> {
    log.entries()
        .into_iter()
        .map(|entry| entry.split_once(" - ").unwrap().1.to_string())
        .collect()
}

#[tokio::test]
async fn should_put_house_to_sleep_with_night_mode() {
    let (mut home, log) = home();
    let light = home.create_device("Living Room", DeviceType::Light, "Main Light");
    let thermostat = home.create_device("Living Room", DeviceType::Thermostat, "Thermostat");
    let door = home.create_device("Living Room", DeviceType::Door, "Front Door");
    let camera = home.create_device("Living Room", DeviceType::SecurityCamera, "Camera");
    light.turn_on();
    door.unlock().unwrap();
    log.clear();

    home.set_mode("night");
    home.execute_current_mode().unwrap();

    assert!(!light.is_on());
    assert_eq!(
        thermostat.kind(),
        DeviceKind::Thermostat { temperature: 19.0 }
    );
    assert_eq!(door.kind(), DeviceKind::Door { locked: true });
    assert_eq!(
        camera.kind(),
        DeviceKind::SecurityCamera { recording: false }
    );

    let messages = messages(&log);
    assert_eq!(
        messages.first().unwrap(),
        "Automation mode changed to: night"
    );
    assert_eq!(
        messages.last().unwrap(),
        "Executed automation mode: Night Mode"
    );
    assert!(messages.contains(&"Living Room Main Light turned OFF".to_string()));
    assert!(messages.contains(&"Living Room Front Door locked".to_string()));
}

#[tokio::test]
async fn should_reach_same_state_when_vacation_mode_runs_twice() {
    let (mut home, log) = home();
    let thermostat = home.create_device("Hall", DeviceType::Thermostat, "Thermostat");
    let door = home.create_device("Hall", DeviceType::Door, "Front Door");
    let light = home.create_device("Hall", DeviceType::Light, "Lamp");
    door.unlock().unwrap();
    light.turn_on();
    home.set_mode("vacation");
    log.clear();

    home.execute_current_mode().unwrap();
    let first_state = (thermostat.kind(), door.kind(), light.is_on());
    let first_run = log.len();
    log.clear();

    home.execute_current_mode().unwrap();
    let second_state = (thermostat.kind(), door.kind(), light.is_on());

    assert_eq!(first_state, second_state);
    assert!(light.is_on());
    // Temperature notifies every time, the lock only on its first transition.
    assert_eq!(first_run, 3);
    assert_eq!(log.len(), 2);
}

#[tokio::test]
async fn should_open_front_door_only_in_the_morning() {
    let (mut home, _) = home();
    let front = home.create_device("Hall", DeviceType::Door, "Front Door");
    let back = home.create_device("Kitchen", DeviceType::Door, "Back Door");
    let lamp = home.create_device("Kitchen", DeviceType::Light, "Lamp");

    home.set_mode("morning");
    home.execute_current_mode().unwrap();

    assert_eq!(front.kind(), DeviceKind::Door { locked: false });
    assert_eq!(back.kind(), DeviceKind::Door { locked: true });
    assert!(lamp.is_on());
    assert_eq!(lamp.kind(), DeviceKind::Light { brightness: 50 });
}

#[tokio::test(start_paused = true)]
async fn should_turn_light_on_when_motion_detected() {
    let (mut home, log) = home();
    let lamp = home.create_device("Hall", DeviceType::Light, "Lamp");
    let sensor = home.motion_sensing(lamp.clone());
    log.clear();

    sensor.detect_motion();

    assert!(lamp.is_on());
    assert!(sensor.is_motion_detected());
    assert_eq!(
        messages(&log),
        vec![
            "Motion detected near Motion-Sensing Hall Lamp",
            "Hall Lamp turned ON",
            "Motion sensor for Motion-Sensing Hall Lamp activated",
        ]
    );

    tokio::time::sleep(MINUTE * 5 + Duration::from_secs(1)).await;
    assert!(!sensor.is_motion_detected());
    assert!(lamp.is_on());
}

#[tokio::test(start_paused = true)]
async fn should_turn_off_once_when_timer_is_replaced() {
    let (mut home, log) = home();
    let lamp = home.create_device("Kitchen", DeviceType::Light, "Ceiling Light");
    lamp.turn_on();
    let timed = home.timed_shutoff(lamp.clone());

    timed.set_timer(1);
    timed.set_timer(5);

    tokio::time::sleep(MINUTE * 2).await;
    assert!(lamp.is_on());
    assert!(timed.is_timer_active());

    tokio::time::sleep(MINUTE * 4).await;
    assert!(!lamp.is_on());
    assert!(!timed.is_timer_active());
    let offs = messages(&log)
        .iter()
        .filter(|m| *m == "Kitchen Ceiling Light turned OFF")
        .count();
    assert_eq!(offs, 1);
}

#[tokio::test(start_paused = true)]
async fn should_turn_off_when_timer_set_on_temporary_decorator() {
    let (mut home, log) = home();
    let lamp = home.create_device("Kitchen", DeviceType::Light, "Lamp");
    lamp.turn_on();
    log.clear();

    home.timed_shutoff(lamp.clone()).set_timer(2);
    tokio::time::sleep(MINUTE * 3).await;

    assert!(!lamp.is_on());
    assert_eq!(
        messages(&log),
        vec![
            "Timer-Enabled Kitchen Lamp set to turn off in 2 minutes",
            "Kitchen Lamp turned OFF",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn should_stack_timer_over_motion_sensor() {
    let (mut home, log) = home();
    let lamp = home.create_device("Bedroom", DeviceType::Light, "Bedside Lamp");
    let smart = Arc::new(home.timed_shutoff(Arc::new(home.motion_sensing(lamp.clone()))));
    home.get_room_mut("Bedroom").unwrap().add_device(smart.clone());
    log.clear();

    assert_eq!(
        smart.describe(),
        "Timer-Enabled Motion-Sensing Bedroom Bedside Lamp"
    );

    smart.inner().detect_motion();
    smart.set_timer(5);
    assert!(lamp.is_on());

    tokio::time::sleep(MINUTE * 5 + Duration::from_secs(1)).await;

    assert!(!lamp.is_on());
    let messages = messages(&log);
    assert!(messages.contains(
        &"Timer-Enabled Motion-Sensing Bedroom Bedside Lamp set to turn off in 5 minutes"
            .to_string()
    ));
    assert_eq!(
        messages.last().unwrap(),
        "Motion sensor for Motion-Sensing Bedroom Bedside Lamp deactivated"
    );
}

#[tokio::test(start_paused = true)]
async fn should_drive_decorated_device_through_automation() {
    let (mut home, log) = home();
    let lamp = home.create_device("Bedroom", DeviceType::Light, "Bedside Lamp");
    let sensor = Arc::new(home.motion_sensing(lamp.clone()));
    home.get_room_mut("Bedroom").unwrap().add_device(sensor.clone());
    sensor.detect_motion();
    log.clear();

    home.set_mode("night");
    home.execute_current_mode().unwrap();

    assert!(!lamp.is_on());
    let deactivated = "Motion sensor for Motion-Sensing Bedroom Bedside Lamp deactivated";
    assert!(messages(&log).iter().any(|m| m == deactivated));
}

#[tokio::test]
async fn should_stop_notifying_removed_listener() {
    let (mut home, log) = home();
    let extra = Arc::new(EventLog::new());
    let id = home.add_listener(extra.clone());

    home.add_room("Attic");
    home.remove_listener(id);
    home.add_room("Cellar");

    assert_eq!(extra.len(), 1);
    assert_eq!(log.len(), 2);
}
