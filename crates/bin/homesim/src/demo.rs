//! Demo scenario: a four-room house driven through every feature once.

use std::sync::Arc;
use std::time::Duration;

use homesim_app::controller::HomeController;
use homesim_app::decorator::{MotionSensing, TimedShutoff};
use homesim_app::device::{Device, SmartDevice};
use homesim_domain::automation::{MorningMode, NightMode, VacationMode};
use homesim_domain::device::DeviceType;
use homesim_domain::error::HomeError;

/// Decorated devices built by the scenario.
///
/// Kept so [`wait_for_timers`](Self::wait_for_timers) can read the pending
/// deadlines.
pub struct Demo {
    motion_light: MotionSensing<Device>,
    timer_light: TimedShutoff<Device>,
    smart_light: Arc<TimedShutoff<MotionSensing<Device>>>,
}

impl Demo {
    /// Sleep until every shutoff timer started by the scenario has fired.
    pub async fn wait_for_timers(&self) {
        let longest = [self.timer_light.remaining(), self.smart_light.remaining()]
            .into_iter()
            .flatten()
            .max();
        if let Some(delay) = longest {
            tracing::info!(wait_ms = delay.as_millis(), "waiting for shutoff timers");
            tokio::time::sleep(delay + Duration::from_millis(10)).await;
        }
    }

    #[must_use]
    pub fn motion_light(&self) -> &MotionSensing<Device> {
        &self.motion_light
    }
}

/// Run the scenario against `home`.
///
/// # Errors
///
/// Propagates [`HomeError`] from device commands or mode execution.
pub fn run(home: &mut HomeController) -> Result<Demo, HomeError> {
    home.register_mode("night", Arc::new(NightMode));
    home.register_mode("vacation", Arc::new(VacationMode));
    home.register_mode("morning", Arc::new(MorningMode));

    for room in ["Living Room", "Kitchen", "Bedroom", "Bathroom"] {
        home.add_room(room);
    }

    let main_light = home.create_device("Living Room", DeviceType::Light, "Main Light");
    let kitchen_light = home.create_device("Kitchen", DeviceType::Light, "Ceiling Light");
    let bedroom_light = home.create_device("Bedroom", DeviceType::Light, "Bedside Lamp");
    let living_thermostat = home.create_device("Living Room", DeviceType::Thermostat, "Thermostat");
    home.create_device("Bedroom", DeviceType::Thermostat, "Thermostat");
    let front_door = home.create_device_from_tag("Living Room", "DOOR", "Front Door")?;
    home.create_device_from_tag("Kitchen", "DOOR", "Back Door")?;
    home.create_device_from_tag("Living Room", "SECURITY_CAMERA", "Security Camera")?;

    section("Basic device control");
    main_light.turn_on();
    main_light.set_brightness(80)?;
    living_thermostat.set_temperature(23.5)?;
    front_door.unlock()?;

    section("Room control");
    for name in ["Kitchen", "Bedroom"] {
        if let Some(room) = home.get_room(name) {
            room.turn_all_on();
        }
    }
    if let Some(room) = home.get_room("Bedroom") {
        room.turn_all_off();
    }

    section("Device decorators");
    let motion_light = home.motion_sensing(main_light);
    motion_light.detect_motion();

    let timer_light = home.timed_shutoff(kitchen_light);
    timer_light.set_timer(2);

    let smart_light = Arc::new(home.timed_shutoff(Arc::new(home.motion_sensing(bedroom_light))));
    if let Some(room) = home.get_room_mut("Bedroom") {
        room.add_device(smart_light.clone());
    }
    smart_light.inner().detect_motion();
    smart_light.set_timer(5);

    section("Automation modes");
    home.set_mode("night");
    home.execute_current_mode()?;
    home.set_mode("morning");
    home.execute_current_mode()?;

    Ok(Demo {
        motion_light,
        timer_light,
        smart_light,
    })
}

fn section(title: &str) {
    println!("\n--- {title} ---");
}
