use utoipa::OpenApi;

use classroll_core::ErrorResponse;
use classroll_models::{
    Course, CourseSummary, CreateStudentDto, Student, StudentStatus, Theme, UserProfile,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::courses::controller::get_courses,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::get_user_by_path,
    ),
    components(
        schemas(
            Course,
            CourseSummary,
            Student,
            StudentStatus,
            CreateStudentDto,
            UserProfile,
            Theme,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Courses", description = "Courses students can enroll in"),
        (name = "Students", description = "Student roster and registration"),
        (name = "Users", description = "Dashboard user profiles")
    ),
    info(
        title = "Classroll API",
        version = "0.1.0",
        description = "Remote Data API behind the Classroll student dashboard.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
