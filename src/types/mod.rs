pub mod registry;

pub use registry::{
    AddChildRequest, AppointmentView, AppointmentsQuery, RegisterParentRequest,
    ScheduleAppointmentRequest,
};
