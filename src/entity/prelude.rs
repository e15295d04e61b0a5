//! 预导入模块，方便使用

pub use super::assessment_submissions::{
    ActiveModel as SubmissionActiveModel, Entity as AssessmentSubmissions,
    Model as SubmissionModel,
};
pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::class_bookings::{
    ActiveModel as ClassBookingActiveModel, Entity as ClassBookings, Model as ClassBookingModel,
};
pub use super::class_enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as ClassEnrollments, Model as EnrollmentModel,
};
pub use super::course_materials::{
    ActiveModel as CourseMaterialActiveModel, Entity as CourseMaterials,
    Model as CourseMaterialModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
