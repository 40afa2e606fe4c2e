use std::collections::BTreeMap;
use std::sync::Arc;

pub(super) use crate::api::fake::{server_error, Call, FakeGateway};
use crate::domain::{
    Enrollment, EnrollmentId, RegistrationDetail, RegistrationId, RegistrationSummary,
};

pub(super) fn enrollment(id: &str, course: &str, student: Option<&str>) -> Enrollment {
    Enrollment {
        id: EnrollmentId(id.to_string()),
        course_id: Some(course.to_string()),
        student_id: student.map(str::to_string),
        enrolled_at: Some("2025-03-02T10:15:00Z".to_string()),
        extra: BTreeMap::new(),
    }
}

pub(super) fn pending_enrollments() -> Vec<Enrollment> {
    vec![
        enrollment("abc123", "defensive-driving", Some("student-7")),
        enrollment("def456", "night-driving", None),
        enrollment("ghi789", "highway-basics", Some("student-9")),
    ]
}

pub(super) fn summary(id: &str, first: &str, last: &str, status: Option<&str>) -> RegistrationSummary {
    RegistrationSummary {
        registration_id: RegistrationId(id.to_string()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        verification_status: status.map(str::to_string),
        extra: BTreeMap::new(),
    }
}

pub(super) fn detail(id: &str, first: &str, last: &str) -> RegistrationDetail {
    RegistrationDetail {
        id: RegistrationId(id.to_string()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        age: Some(serde_json::json!(27)),
        sex: Some("female".to_string()),
        verification_status: Some("pending".to_string()),
        user_image_url: Some("https://cdn.example.com/photo.jpg".to_string()),
        national_id_url: Some("https://cdn.example.com/id.png".to_string()),
        educational_certificate_url: None,
        medical_report_url: Some("https://cdn.example.com/med.pdf".to_string()),
        extra: BTreeMap::new(),
    }
}

pub(super) fn registration_gateway() -> Arc<FakeGateway> {
    Arc::new(FakeGateway::with_registrations(
        vec![
            summary("reg-1", "Abebe", "Kebede", None),
            summary("reg-2", "Meron", "Alemu", Some("approved")),
            summary("reg-3", "Selam", "Girma", Some("rejected")),
        ],
        vec![detail("reg-1", "Abebe", "Kebede"), detail("reg-2", "Meron", "Alemu")],
    ))
}
