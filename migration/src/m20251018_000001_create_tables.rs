use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FullName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string_len(255).not_null())
                    .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::SurveyAnswers).text().null())
                    .col(ColumnDef::new(Users::ProfilePicture).string().null())
                    .col(ColumnDef::new(Users::PhoneNumber).string().null())
                    .col(ColumnDef::new(Users::Institution).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().null())
                    .col(ColumnDef::new(Users::LastLoginAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 创建课程预约表
        manager
            .create_table(
                Table::create()
                    .table(ClassBookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassBookings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassBookings::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassBookings::Description).text().null())
                    .col(
                        ColumnDef::new(ClassBookings::Subject)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassBookings::StartTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassBookings::EndTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassBookings::MeetingLink)
                            .string_len(500)
                            .null(),
                    )
                    .col(ColumnDef::new(ClassBookings::Location).string_len(100).null())
                    .col(ColumnDef::new(ClassBookings::MaxStudents).integer().null())
                    .col(
                        ColumnDef::new(ClassBookings::Status)
                            .string_len(20)
                            .not_null()
                            .default("SCHEDULED"),
                    )
                    .col(
                        ColumnDef::new(ClassBookings::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassBookings::UpdatedAt).big_integer().null())
                    .col(
                        ColumnDef::new(ClassBookings::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassBookings::Table, ClassBookings::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课关联表
        manager
            .create_table(
                Table::create()
                    .table(ClassEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassEnrollments::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ClassEnrollments::ClassId)
                            .col(ClassEnrollments::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEnrollments::Table, ClassEnrollments::ClassId)
                            .to(ClassBookings::Table, ClassBookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEnrollments::Table, ClassEnrollments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程资料表
        manager
            .create_table(
                Table::create()
                    .table(CourseMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseMaterials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseMaterials::Description).text().null())
                    .col(
                        ColumnDef::new(CourseMaterials::FileName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::FilePath)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::FileType)
                            .string_len(50)
                            .null(),
                    )
                    .col(ColumnDef::new(CourseMaterials::FileSize).big_integer().null())
                    .col(
                        ColumnDef::new(CourseMaterials::DownloadCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::UploadedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseMaterials::Table, CourseMaterials::ClassId)
                            .to(ClassBookings::Table, ClassBookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseMaterials::Table, CourseMaterials::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测评表
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Assessments::Description).text().null())
                    .col(ColumnDef::new(Assessments::Questions).text().not_null())
                    .col(ColumnDef::new(Assessments::TimeLimit).integer().null())
                    .col(ColumnDef::new(Assessments::TotalPoints).integer().null())
                    .col(ColumnDef::new(Assessments::DueDate).big_integer().null())
                    .col(
                        ColumnDef::new(Assessments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::UpdatedAt).big_integer().null())
                    .col(ColumnDef::new(Assessments::ClassId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assessments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::ClassId)
                            .to(ClassBookings::Table, ClassBookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测评提交表
        manager
            .create_table(
                Table::create()
                    .table(AssessmentSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssessmentSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssessmentSubmissions::Answers)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssessmentSubmissions::Score).integer().null())
                    .col(
                        ColumnDef::new(AssessmentSubmissions::TotalPoints)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentSubmissions::Percentage)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(AssessmentSubmissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(AssessmentSubmissions::Status)
                            .string_len(20)
                            .not_null()
                            .default("SUBMITTED"),
                    )
                    .col(
                        ColumnDef::new(AssessmentSubmissions::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentSubmissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentSubmissions::UpdatedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentSubmissions::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentSubmissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentSubmissions::GradedBy)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssessmentSubmissions::Table,
                                AssessmentSubmissions::AssessmentId,
                            )
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssessmentSubmissions::Table,
                                AssessmentSubmissions::StudentId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentSubmissions::Table, AssessmentSubmissions::GradedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::IsEmailSent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::ReadAt).big_integer().null())
                    .col(
                        ColumnDef::new(Notifications::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::SenderId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 用户表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        // 课程表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_bookings_teacher_id")
                    .table(ClassBookings::Table)
                    .col(ClassBookings::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_bookings_start_time")
                    .table(ClassBookings::Table)
                    .col(ClassBookings::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_enrollments_student_id")
                    .table(ClassEnrollments::Table)
                    .col(ClassEnrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        // 资料与测评索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_materials_class_id")
                    .table(CourseMaterials::Table)
                    .col(CourseMaterials::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_class_id")
                    .table(Assessments::Table)
                    .col(Assessments::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessment_submissions_student_id")
                    .table(AssessmentSubmissions::Table)
                    .col(AssessmentSubmissions::StudentId)
                    .to_owned(),
            )
            .await?;

        // 通知表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_recipient_read")
                    .table(Notifications::Table)
                    .col(Notifications::RecipientId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssessmentSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassEnrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassBookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    FullName,
    Email,
    Password,
    Role,
    IsActive,
    IsApproved,
    SurveyAnswers,
    ProfilePicture,
    PhoneNumber,
    Institution,
    CreatedAt,
    UpdatedAt,
    LastLoginAt,
}

#[derive(DeriveIden)]
enum ClassBookings {
    #[sea_orm(iden = "class_bookings")]
    Table,
    Id,
    Title,
    Description,
    Subject,
    StartTime,
    EndTime,
    MeetingLink,
    Location,
    MaxStudents,
    Status,
    CreatedAt,
    UpdatedAt,
    TeacherId,
}

#[derive(DeriveIden)]
enum ClassEnrollments {
    #[sea_orm(iden = "class_enrollments")]
    Table,
    ClassId,
    StudentId,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum CourseMaterials {
    #[sea_orm(iden = "course_materials")]
    Table,
    Id,
    Title,
    Description,
    FileName,
    FilePath,
    FileType,
    FileSize,
    DownloadCount,
    CreatedAt,
    ClassId,
    UploadedBy,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    Title,
    Description,
    Questions,
    TimeLimit,
    TotalPoints,
    DueDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
    ClassId,
    CreatedBy,
}

#[derive(DeriveIden)]
enum AssessmentSubmissions {
    #[sea_orm(iden = "assessment_submissions")]
    Table,
    Id,
    Answers,
    Score,
    TotalPoints,
    Percentage,
    Feedback,
    Status,
    SubmittedAt,
    CreatedAt,
    UpdatedAt,
    AssessmentId,
    StudentId,
    GradedBy,
}

#[derive(DeriveIden)]
enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    Title,
    Message,
    #[sea_orm(iden = "type")]
    NotificationType,
    IsRead,
    IsEmailSent,
    CreatedAt,
    ReadAt,
    RecipientId,
    SenderId,
}
