use std::sync::Arc;

use classroom::database::MemoryBackend;
use classroom::model::profile::Profile;

pub const COURSE: i64 = 101;

/// Three students and a teacher, with `s1` enrolled in [`COURSE`] and `s3`
/// enrolled in another course.
pub fn seeded_backend() -> Arc<MemoryBackend> {
    Arc::new(
        MemoryBackend::new()
            .with_profile(
                Profile::new("s1", "Ann Archer", "ann@school.org")
                    .with_avatar("https://cdn.school.org/ann.png"),
                "student",
            )
            .with_profile(Profile::new("s2", "", "bob@school.org"), "student")
            .with_profile(Profile::new("s3", "Cat Cole", "cat@school.org"), "student")
            .with_profile(Profile::new("t1", "Tom Teach", "tom@school.org"), "teacher")
            .with_enrollment(COURSE, "s1")
            .with_enrollment(COURSE + 1, "s3"),
    )
}
