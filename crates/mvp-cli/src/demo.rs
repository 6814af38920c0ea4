//! # Demo Subcommand
//!
//! Builds a small spin-echo protocol from declared parameter types, derives
//! the dead time between echo and repetition, and shows a repetition time
//! that follows the echo time through observer notification.
//!
//! ```bash
//! mvp demo
//! mvp demo --te 8 --te 16 --tr 40 --flip-angle 30
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use clap::Args;

use mvp_core::Vector3;
use mvp_param::{declare_parameter, register_parameter, ParameterContainer, TypeRegistry};
use mvp_units::{Degree, Millimetre, Millisecond};

declare_parameter!(
    /// Echo times of a multi-echo readout.
    pub EchoTime, "Echo Time", f64, Millisecond
);
declare_parameter!(
    /// Repetition time.
    pub RepetitionTime, "Repetition Time", f64, Millisecond
);
declare_parameter!(
    /// Repetition time minus each echo time.
    pub DeadTime, "Dead Time", f64, Millisecond
);
declare_parameter!(
    /// Excitation flip angle.
    pub FlipAngle, "Flip Angle", f64, Degree
);
declare_parameter!(
    /// Field of view along read, phase and slice.
    pub FieldOfView, "Field of View", Vector3, Millimetre
);

register_parameter!(
    /// Notifier tag of the echo time.
    pub EchoTimeTag, "TE"
);
register_parameter!(
    /// Notifier tag of the repetition time.
    pub RepetitionTimeTag, "TR"
);

/// Arguments for the demo subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Echo time in ms. Repeat for a multi-echo readout.
    #[arg(long = "te", default_values_t = [10.0, 20.0, 30.0])]
    pub echo_times: Vec<f64>,

    /// Repetition time in ms.
    #[arg(long = "tr", default_value_t = 500.0)]
    pub repetition_time: f64,

    /// Flip angle in degrees.
    #[arg(long, default_value_t = 90.0)]
    pub flip_angle: f64,
}

/// Every parameter type the demo protocol uses.
pub fn registry() -> Result<TypeRegistry> {
    let mut registry = TypeRegistry::new();
    registry.register_type::<EchoTime>()?;
    registry.register_type::<RepetitionTime>()?;
    registry.register_type::<DeadTime>()?;
    registry.register_type::<FlipAngle>()?;
    registry.register_type::<FieldOfView>()?;
    Ok(registry)
}

/// The protocol for the given arguments.
pub fn build_protocol(args: &DemoArgs) -> Result<ParameterContainer> {
    if args.echo_times.is_empty() {
        bail!("at least one echo time is required");
    }
    if let Some(te) = args
        .echo_times
        .iter()
        .find(|te| **te >= args.repetition_time)
    {
        bail!(
            "echo time {te} ms does not fit in repetition time {} ms",
            args.repetition_time
        );
    }

    let te = EchoTime::from(args.echo_times.clone());
    let tr = RepetitionTime::from(args.repetition_time);
    let dead = DeadTime::from((&*tr - &*te)?);
    tracing::debug!(dead = %dead, "derived dead time");

    let mut protocol = ParameterContainer::new();
    protocol.add(te);
    protocol.add(tr);
    protocol.add(dead);
    protocol.add(FlipAngle::from(args.flip_angle));
    protocol.add(FieldOfView::from(Vector3::new(256.0, 256.0, 5.0)));
    Ok(protocol)
}

/// Repetition time after it follows an echo time change.
///
/// The repetition time observes the echo time and keeps at least
/// `ratio` times the longest echo.
pub fn follow_echo_time(repetition_time: f64, new_echo_time: f64, ratio: f64) -> Result<f64> {
    let tr = Rc::new(RefCell::new(RepetitionTimeTag::parameter(repetition_time)));
    tr.borrow_mut()
        .set_notification_handler(EchoTimeTag::tag(), move |this, notifier| {
            let Ok(te) = notifier.get::<f64>() else {
                tracing::warn!(notifier = %notifier, "echo time is not a double");
                return;
            };
            let floor = te * ratio;
            if this.get::<f64>().is_ok_and(|tr| *tr < floor) {
                this.set(floor);
            }
        });

    let mut te = EchoTimeTag::parameter(0.0);
    te.add_observer(&tr);
    te.set(new_echo_time);

    let value = *tr.borrow().get::<f64>()?;
    Ok(value)
}

/// Execute the demo subcommand.
pub fn run_demo(args: &DemoArgs) -> Result<u8> {
    let registry = registry()?;
    println!("Registered parameter types:");
    for descriptor in registry.iter() {
        println!(
            "  {:<20} {:<8} {}",
            descriptor.name, descriptor.unit_symbol, descriptor.category
        );
    }

    println!();
    println!("Protocol:");
    print!("{}", build_protocol(args)?.render_all());

    let longest = args.echo_times.iter().copied().fold(0.0, f64::max);
    let followed = follow_echo_time(args.repetition_time, longest * 2.0, 4.0)?;
    println!();
    println!(
        "TE -> {} ms: TR follows {} ms -> {followed} ms",
        longest * 2.0,
        args.repetition_time
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(echo_times: &[f64], repetition_time: f64) -> DemoArgs {
        DemoArgs {
            echo_times: echo_times.to_vec(),
            repetition_time,
            flip_angle: 90.0,
        }
    }

    #[test]
    fn registry_holds_every_protocol_type() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("Flip Angle").unwrap().unit_symbol, "deg");
        assert!(registry.contains("Dead Time"));
    }

    #[test]
    fn dead_time_is_tr_minus_each_te() {
        let protocol = build_protocol(&args(&[10.0, 20.0], 100.0)).unwrap();
        assert_eq!(protocol.len(), 5);
        let dead = protocol.find_as::<DeadTime>("Dead Time").unwrap();
        assert_eq!(dead.values(), &[90.0, 80.0]);
        assert_eq!(
            protocol.find("Echo Time").unwrap().value_as_string(),
            "[10, 20]"
        );
    }

    #[test]
    fn rendered_protocol_has_one_line_per_parameter() {
        let table = build_protocol(&args(&[10.0], 500.0)).unwrap().render_all();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].ends_with(": 500 ms"));
        assert!(lines[4].ends_with(": [256; 256; 5] mm"));
    }

    #[test]
    fn echo_longer_than_repetition_is_rejected() {
        let err = build_protocol(&args(&[10.0, 600.0], 500.0)).unwrap_err();
        assert!(err.to_string().contains("600"));
        assert!(build_protocol(&args(&[], 500.0)).is_err());
    }

    #[test]
    fn repetition_time_follows_echo_time() {
        assert_eq!(follow_echo_time(100.0, 40.0, 4.0).unwrap(), 160.0);
        assert_eq!(follow_echo_time(500.0, 40.0, 4.0).unwrap(), 500.0);
    }
}
